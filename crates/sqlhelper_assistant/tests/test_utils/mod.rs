//! Test utilities for sqlhelper_assistant tests.
//!
//! Hand-written fakes for every collaborator of the repair loop.

pub mod fake_database;
pub mod mock_llm;
pub mod scripted_console;

#[allow(unused_imports)]
pub use fake_database::{CursorStats, FakeResult, FakeSession};
#[allow(unused_imports)]
pub use mock_llm::ScriptedDriver;
#[allow(unused_imports)]
pub use scripted_console::{RecordingPresenter, ScriptedInteraction};
