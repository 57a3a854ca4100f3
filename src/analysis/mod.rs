/*! Offline schedulability tests

This module decides, from the static task parameters alone, whether a
task set is schedulable on a dedicated uniprocessor under either
rate-monotonic (**RM**) or earliest-deadline-first (**EDF**)
scheduling:

- [rm] provides the Liu & Layland utilization-bound test and an exact
  response-time analysis (RTA) that is consulted only when the bound
  test is inconclusive;
- [edf] provides the utilization test with bound `1.0`.

The result is an [Analysis] value recording the verdict, the total
utilization, the bound that was used, the hyperperiod, and which test
determined the verdict.
*/

use derive_more::Display;
use tracing::info;

use crate::task::TaskSet;
use crate::time::Duration;

pub mod edf;
pub mod rm;

pub use rm::Rta;

/// The scheduling policy under study.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Fixed priorities in order of increasing period.
    #[display(fmt = "RM")]
    RateMonotonic,
    /// Dynamic priorities in order of increasing absolute deadline.
    #[display(fmt = "EDF")]
    EarliestDeadlineFirst,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    #[display(fmt = "SCHEDULABLE")]
    Schedulable,
    #[display(fmt = "NOT SCHEDULABLE")]
    NotSchedulable,
}

impl Verdict {
    pub fn from_bool(schedulable: bool) -> Self {
        if schedulable {
            Verdict::Schedulable
        } else {
            Verdict::NotSchedulable
        }
    }

    pub fn is_schedulable(self) -> bool {
        self == Verdict::Schedulable
    }
}

/// The test that ultimately determined a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Test {
    /// RM: total utilization did not exceed the Liu & Layland bound.
    UtilizationBound,
    /// RM: the bound test failed and response-time analysis decided.
    ResponseTime(Rta),
    /// EDF: total utilization compared against `1.0`.
    Utilization,
}

/// The complete result of a schedulability analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub algorithm: Algorithm,
    pub verdict: Verdict,
    /// Total utilization of the task set.
    pub utilization: f64,
    /// The utilization bound compared against.
    pub bound: f64,
    /// The simulation horizon.
    pub hyperperiod: Duration,
    pub test: Test,
}

/// Run the schedulability test(s) of `algorithm` on `tasks`.
pub fn analyze(tasks: &TaskSet, algorithm: Algorithm) -> Analysis {
    let hyperperiod = tasks.hyperperiod();
    let utilization = tasks.utilization();
    let (verdict, bound, test) = match algorithm {
        Algorithm::RateMonotonic => rm::test(tasks, utilization),
        Algorithm::EarliestDeadlineFirst => edf::test(utilization),
    };
    info!(
        %algorithm,
        %verdict,
        utilization,
        bound,
        hyperperiod,
        "schedulability analysis finished"
    );
    Analysis {
        algorithm,
        verdict,
        utilization,
        bound,
        hyperperiod,
        test,
    }
}

#[cfg(test)]
mod tests;
