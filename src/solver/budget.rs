//! Stop conditions checked between local search passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::SolveStatus;

/// Pass, time and cancellation limits of one solve.
///
/// The clock starts when the budget is created, so construction counts
/// against the time limit.
#[derive(Debug, Clone)]
pub(crate) struct SearchBudget<'a> {
    max_passes: usize,
    time_limit: Option<Duration>,
    started: Instant,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> SearchBudget<'a> {
    pub(crate) fn new(max_passes: usize, time_limit: Option<Duration>) -> Self {
        Self {
            max_passes,
            time_limit,
            started: Instant::now(),
            interrupt: None,
        }
    }

    /// Stops the search once `flag` is set.
    pub(crate) fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Returns why the search must stop before pass `passes + 1`, if it must.
    ///
    /// Cancellation wins over the time limit, which wins over the pass limit.
    pub(crate) fn exhausted(&self, passes: usize) -> Option<SolveStatus> {
        if self.interrupt.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Some(SolveStatus::Cancelled);
        }
        if self
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
        {
            return Some(SolveStatus::TimeLimit);
        }
        if passes >= self.max_passes {
            return Some(SolveStatus::IterationLimit);
        }
        None
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
