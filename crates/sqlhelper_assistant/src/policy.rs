//! Repair attempt accounting.

use sqlhelper_core::RepairPolicy;
use std::time::Duration;
use tokio_retry2::strategy::ExponentialBackoff;

/// Tracks the repairs spent under a [`RepairPolicy`].
///
/// # Examples
///
/// ```
/// use sqlhelper_assistant::RepairBudget;
/// use sqlhelper_core::RepairPolicy;
///
/// let mut budget = RepairBudget::new(RepairPolicy {
///     max_attempts: Some(1),
///     ..RepairPolicy::default()
/// });
/// assert!(!budget.is_exhausted());
/// assert_eq!(budget.spend(), std::time::Duration::ZERO);
/// assert!(budget.is_exhausted());
/// ```
#[derive(Debug)]
pub struct RepairBudget {
    max_attempts: Option<u32>,
    used: u32,
    delays: Option<ExponentialBackoff>,
}

impl RepairBudget {
    /// Start an unspent budget.
    pub fn new(policy: RepairPolicy) -> Self {
        // from_millis(2) with factor `unit` yields unit * 2^n for n = 1, 2, ...
        let delays = (policy.backoff_unit_ms > 0).then(|| {
            let strategy = ExponentialBackoff::from_millis(2).factor(policy.backoff_unit_ms);
            if policy.backoff_max_ms > 0 {
                strategy.max_delay(Duration::from_millis(policy.backoff_max_ms))
            } else {
                strategy
            }
        });
        Self {
            max_attempts: policy.max_attempts,
            used: 0,
            delays,
        }
    }

    /// Repairs spent so far.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Whether no further repair may be generated.
    pub fn is_exhausted(&self) -> bool {
        self.max_attempts.is_some_and(|max| self.used >= max)
    }

    /// Record one repair and return how long to wait before generating it.
    pub fn spend(&mut self) -> Duration {
        self.used = self.used.saturating_add(1);
        self.delays
            .as_mut()
            .and_then(Iterator::next)
            .unwrap_or(Duration::ZERO)
    }
}
