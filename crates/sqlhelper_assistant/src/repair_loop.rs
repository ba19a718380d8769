//! The execute / repair state machine.

use crate::{QueryGenerator, RepairBudget};
use derive_getters::Getters;
use sqlhelper_core::{
    CheckedStatement, DEFAULT_PAGE_SIZE, GeneratedSql, QueryText, RepairPolicy,
};
use sqlhelper_error::{SqlHelperError, SqlHelperResult};
use sqlhelper_interface::{
    Interaction, LlmDriver, Presenter, SqlCursor, SqlSession, StatementGuard,
};
use tracing::{debug, info, instrument, warn};

/// How a run of the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LoopOutcome {
    /// A candidate executed and its rows were shown
    #[display("succeeded")]
    Succeeded,
    /// The user declined to repair a failing candidate
    #[display("declined")]
    Declined,
    /// The repair policy ran out while the latest candidate still failed
    #[display("attempts exhausted")]
    AttemptsExhausted,
}

/// Summary of a finished loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct LoopReport {
    /// How the loop ended
    outcome: LoopOutcome,
    /// Candidates submitted for execution
    attempts: u32,
}

enum LoopState {
    Running(GeneratedSql),
    Done(LoopOutcome),
}

/// Generates, executes and repairs queries until one succeeds or the user
/// stops.
///
/// Every candidate runs on a cursor of its own. A candidate failing with a
/// query-level error is offered for repair; every other error ends the loop.
pub struct RepairLoop<'a, D> {
    generator: &'a QueryGenerator<D>,
    guard: &'a dyn StatementGuard,
    page_size: usize,
    policy: RepairPolicy,
}

impl<'a, D: LlmDriver> RepairLoop<'a, D> {
    /// Create a loop with the default page size and an unbounded policy.
    pub fn new(generator: &'a QueryGenerator<D>, guard: &'a dyn StatementGuard) -> Self {
        Self {
            generator,
            guard,
            page_size: DEFAULT_PAGE_SIZE,
            policy: RepairPolicy::default(),
        }
    }

    /// Rows shown before asking whether to show the rest.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Bound the number of repairs.
    pub fn with_policy(mut self, policy: RepairPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Answer `question`, repairing failed candidates while the user agrees.
    ///
    /// # Errors
    ///
    /// Returns every error that is not query-level: LLM failures, connection
    /// and transaction failures, and terminal I/O.
    #[instrument(skip_all, fields(page_size = self.page_size, max_attempts = ?self.policy.max_attempts))]
    pub async fn run(
        &self,
        question: &str,
        session: &mut dyn SqlSession,
        interaction: &mut dyn Interaction,
        presenter: &mut dyn Presenter,
    ) -> SqlHelperResult<LoopReport> {
        let mut budget = RepairBudget::new(self.policy);
        let mut attempts = 0u32;
        let first = self
            .generator
            .generate(&QueryText::Question(question.to_string()))
            .await?;
        let mut state = LoopState::Running(first);

        loop {
            state = match state {
                LoopState::Done(outcome) => {
                    info!(%outcome, attempts, "Query loop finished");
                    return Ok(LoopReport { outcome, attempts });
                }
                LoopState::Running(candidate) => {
                    attempts += 1;
                    presenter.show_query(&candidate)?;
                    match self.attempt(&candidate, session, interaction, presenter) {
                        Ok(()) => LoopState::Done(LoopOutcome::Succeeded),
                        Err(err) => {
                            self.recover(err, attempts, &mut budget, interaction)
                                .await?
                        }
                    }
                }
            };
        }
    }

    /// Decide what follows a failed attempt.
    ///
    /// Only query-level errors are offered for repair; anything else is
    /// returned as is.
    async fn recover(
        &self,
        err: SqlHelperError,
        attempt: u32,
        budget: &mut RepairBudget,
        interaction: &mut dyn Interaction,
    ) -> SqlHelperResult<LoopState> {
        let message = err
            .as_database()
            .filter(|db| db.is_query_level())
            .map(|db| db.message());
        let Some(message) = message else {
            return Err(err);
        };
        warn!(attempt, error = %message, "Query failed");

        if budget.is_exhausted() {
            return Ok(LoopState::Done(LoopOutcome::AttemptsExhausted));
        }
        if !interaction.confirm_repair(&message)? {
            return Ok(LoopState::Done(LoopOutcome::Declined));
        }

        let delay = budget.spend();
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "Waiting before repair");
            tokio::time::sleep(delay).await;
        }
        let repaired = self
            .generator
            .generate(&QueryText::Repair(message))
            .await?;
        Ok(LoopState::Running(repaired))
    }

    /// Run one candidate on a fresh cursor, closing the cursor on every path.
    fn attempt(
        &self,
        candidate: &GeneratedSql,
        session: &mut dyn SqlSession,
        interaction: &mut dyn Interaction,
        presenter: &mut dyn Presenter,
    ) -> SqlHelperResult<()> {
        let statement = self.guard.check(candidate)?;
        let mut cursor = session.open_cursor()?;
        let result = self.page_through(cursor.as_mut(), &statement, interaction, presenter);

        match (result, cursor.close()) {
            (Ok(()), closed) => closed.map_err(SqlHelperError::from),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "Failed to release cursor after error");
                Err(err)
            }
        }
    }

    fn page_through(
        &self,
        cursor: &mut dyn SqlCursor,
        statement: &CheckedStatement,
        interaction: &mut dyn Interaction,
        presenter: &mut dyn Presenter,
    ) -> SqlHelperResult<()> {
        cursor.execute(statement)?;

        let first = cursor.fetch_many(self.page_size)?;
        debug!(rows = first.len(), "Fetched first page");
        presenter.show_rows(&first)?;

        if first.len() == self.page_size && interaction.confirm_show_all()? {
            let rest = cursor.fetch_all()?;
            debug!(rows = rest.len(), "Fetched remaining rows");
            presenter.show_rows(&rest)?;
        }
        Ok(())
    }
}
