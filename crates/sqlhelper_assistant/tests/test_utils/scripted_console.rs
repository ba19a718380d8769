//! Scripted user decisions and a presenter that records what it shows.

use sqlhelper_core::{GeneratedSql, ResultPage};
use sqlhelper_error::ConsoleResult;
use sqlhelper_interface::{Interaction, Presenter};
use std::collections::VecDeque;

/// Answers prompts from queues; an empty queue answers "no".
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    question: String,
    show_all: VecDeque<bool>,
    repairs: VecDeque<bool>,
    /// Error texts shown with each repair prompt
    pub repair_prompts: Vec<String>,
    /// Number of show-all prompts
    pub show_all_prompts: usize,
}

impl ScriptedInteraction {
    /// Script the answers to show-all and repair prompts.
    pub fn new(show_all: &[bool], repairs: &[bool]) -> Self {
        Self {
            question: "list the users".to_string(),
            show_all: show_all.iter().copied().collect(),
            repairs: repairs.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn ask_question(&mut self) -> ConsoleResult<String> {
        Ok(self.question.clone())
    }

    fn confirm_show_all(&mut self) -> ConsoleResult<bool> {
        self.show_all_prompts += 1;
        Ok(self.show_all.pop_front().unwrap_or(false))
    }

    fn confirm_repair(&mut self, error: &str) -> ConsoleResult<bool> {
        self.repair_prompts.push(error.to_string());
        Ok(self.repairs.pop_front().unwrap_or(false))
    }
}

/// Keeps every query and page it is asked to show.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    /// Candidate statements, in order
    pub queries: Vec<String>,
    /// Pages, in order
    pub pages: Vec<ResultPage>,
}

impl RecordingPresenter {
    /// Total rows shown across pages.
    pub fn rows_shown(&self) -> usize {
        self.pages.iter().map(ResultPage::len).sum()
    }
}

impl Presenter for RecordingPresenter {
    fn show_query(&mut self, sql: &GeneratedSql) -> ConsoleResult<()> {
        self.queries.push(sql.as_str().to_string());
        Ok(())
    }

    fn show_rows(&mut self, page: &ResultPage) -> ConsoleResult<()> {
        self.pages.push(page.clone());
        Ok(())
    }
}
