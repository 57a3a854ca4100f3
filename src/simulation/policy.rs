use std::cmp::Ordering;

use auto_impl::auto_impl;

use super::JobState;
use crate::analysis::{rm, Algorithm};
use crate::task::Task;

/// A task with a pending job, as seen by a [Policy].
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Declaration index of the task within its task set.
    pub index: usize,
    pub task: &'a Task,
    pub state: &'a JobState,
}

/// The priority relation used to pick the job that runs in a tick.
#[auto_impl(&, Box)]
pub trait Policy {
    /// `Ordering::Less` means that `a` has the higher priority. The
    /// order must be total over the candidates of a single tick.
    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering;
}

/// Fixed priorities: shorter periods first, ties resolved in favor of
/// the task declared first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateMonotonic;

impl Policy for RateMonotonic {
    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        rm::priority_order((a.index, a.task), (b.index, b.task))
    }
}

/// Dynamic priorities: earlier absolute deadlines first, ties resolved
/// in favor of the earlier-released job, then the task declared first.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestDeadlineFirst;

impl Policy for EarliestDeadlineFirst {
    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        a.state
            .absolute_deadline
            .cmp(&b.state.absolute_deadline)
            .then(a.state.next_release.cmp(&b.state.next_release))
            .then(a.index.cmp(&b.index))
    }
}

impl Algorithm {
    /// The dispatch policy that implements this algorithm.
    pub fn policy(self) -> Box<dyn Policy> {
        match self {
            Algorithm::RateMonotonic => Box::new(RateMonotonic),
            Algorithm::EarliestDeadlineFirst => Box::new(EarliestDeadlineFirst),
        }
    }
}
