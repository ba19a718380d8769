//! Terminal front end for sqlhelper.
//!
//! [`ConsoleInteraction`] asks the question and the yes/no prompts through a
//! [`LineSource`]; [`PlainPresenter`] and [`TablePresenter`] render queries
//! and rows.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod highlight;
mod interaction;
mod presenter;
mod table;

pub use highlight::highlight_sql;
pub use interaction::{
    BufferedSource, CHOICE_SUFFIX, ConsoleInteraction, LineSource, QUESTION_PROMPT,
    RustylineSource, SHOW_ALL_PROMPT, parse_choice, parse_yes_no, repair_prompt,
};
pub use presenter::{PlainPresenter, TablePresenter, format_row, presenter_for};
pub use table::{render_table, terminal_width};
