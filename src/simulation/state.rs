use crate::task::Task;
use crate::time::{Instant, Service};

/// The mutable per-task state of one simulation run: the status of the
/// task's current job and when its next job is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobState {
    /// Cost left for the current job; zero when no job is pending.
    pub remaining: Service,
    /// The instant at which the next job is released.
    pub next_release: Instant,
    /// The instant by which the current job must be complete.
    pub absolute_deadline: Instant,
}

impl JobState {
    /// The state of `task` before time zero: idle, first release at
    /// its phase.
    pub fn initial(task: &Task) -> Self {
        JobState {
            remaining: 0,
            next_release: task.phase,
            absolute_deadline: task.phase.saturating_add(task.deadline),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.remaining > 0
    }

    pub fn is_due(&self, t: Instant) -> bool {
        self.next_release == t
    }

    /// Release a fresh job of `task` at time `t`.
    pub fn release(&mut self, task: &Task, t: Instant) {
        self.remaining = task.wcet;
        self.absolute_deadline = t.saturating_add(task.deadline);
    }

    /// A pending job whose deadline is not in the future has missed it.
    pub fn has_missed(&self, t: Instant) -> bool {
        self.is_pending() && self.absolute_deadline <= t
    }

    /// Drop the current job. It is not carried over to later ticks.
    pub fn abandon(&mut self) {
        self.remaining = 0;
    }

    /// Run the current job of `task` for one tick. Returns `true` if the
    /// job completed, in which case the next release is scheduled one
    /// period after the previous one.
    pub fn execute(&mut self, task: &Task) -> bool {
        debug_assert!(self.is_pending());
        self.remaining -= 1;
        if self.remaining == 0 {
            self.next_release = self.next_release.saturating_add(task.period);
            true
        } else {
            false
        }
    }
}
