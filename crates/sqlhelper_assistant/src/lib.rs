//! The generate, execute and repair stages of sqlhelper.
//!
//! [`QueryGenerator`] turns a question (or the last execution error) into a
//! candidate statement. [`RepairLoop`] executes candidates on fresh cursors,
//! pages the results and asks the user before each repair.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod guard;
mod policy;
mod repair_loop;

pub use generator::QueryGenerator;
pub use guard::{PassThroughGuard, SingleStatementGuard};
pub use policy::RepairBudget;
pub use repair_loop::{LoopOutcome, LoopReport, RepairLoop};
