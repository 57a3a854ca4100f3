//! Tests for *rate-monotonic* (**RM**) fixed-priority scheduling

use std::cmp::Ordering;

use tracing::debug;

use super::{Test, Verdict};
use crate::fixed_point::{self, SearchFailure};
use crate::task::{Task, TaskSet};
use crate::time::{Duration, Service};

/// The Liu & Layland utilization bound `n·(2^(1/n) − 1)` for `n` tasks.
///
/// For `n <= 1` the bound is exactly `1.0`; the formula is not
/// evaluated for an empty set.
pub fn utilization_bound(n: usize) -> f64 {
    if n <= 1 {
        return 1.0;
    }
    let n = n as f64;
    n * (2f64.powf(1.0 / n) - 1.0)
}

/// Compare two tasks by RM priority. `Ordering::Less` means the first
/// task has the higher priority: shorter periods win, and equal periods
/// are resolved in favor of the lower declaration index.
pub fn priority_order((i, a): (usize, &Task), (j, b): (usize, &Task)) -> Ordering {
    a.period.cmp(&b.period).then(i.cmp(&j))
}

/// Whether task `j` has a higher RM priority than task `i`.
pub fn has_higher_priority(tasks: &TaskSet, j: usize, i: usize) -> bool {
    priority_order((j, &tasks[j]), (i, &tasks[i])) == Ordering::Less
}

/// Bound the response time of task `i` under fully-preemptive RM on a
/// dedicated uniprocessor by iterating
///
/// `R ← wcet_i + Σ_{j ∈ hp(i)} ⌈R / period_j⌉ · wcet_j`
///
/// from `R = wcet_i`. The task's relative deadline is the divergence
/// limit, so a [SearchFailure] means the task may miss its deadline.
pub fn response_time(tasks: &TaskSet, i: usize) -> fixed_point::SearchResult {
    let tua = &tasks[i];
    let interfering: Vec<&Task> = (0..tasks.len())
        .filter(|&j| has_higher_priority(tasks, j, i))
        .map(|j| &tasks[j])
        .collect();

    // Saturate rather than wrap: a saturated workload exceeds any deadline
    // below `Duration::MAX` and so reads as divergence.
    let rhs = |r: Duration| -> Service {
        let interference: Service = interfering
            .iter()
            .map(|hp| divide_with_ceil(r, hp.period).saturating_mul(hp.wcet))
            .fold(0, Service::saturating_add);
        tua.wcet.saturating_add(interference)
    };

    fixed_point::search(tua.wcet, tua.deadline, rhs)
}

/// The outcome of response-time analysis over a whole task set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rta {
    /// Response-time bounds of the tasks analysed before the first
    /// failure, in declaration order.
    pub response_times: Vec<Duration>,
    /// The first task whose response time exceeded its deadline.
    pub failure: Option<(usize, SearchFailure)>,
}

impl Rta {
    pub fn is_schedulable(&self) -> bool {
        self.failure.is_none()
    }
}

/// Analyse every task in declaration order, stopping at the first one
/// whose iteration exceeds its deadline.
pub fn response_time_analysis(tasks: &TaskSet) -> Rta {
    let mut response_times = Vec::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        match response_time(tasks, i) {
            Ok(r) => {
                debug!(task = %task.name, response_time = r, "response-time bound found");
                response_times.push(r);
            }
            Err(failure) => {
                debug!(task = %task.name, %failure, "response-time analysis failed");
                return Rta {
                    response_times,
                    failure: Some((i, failure)),
                };
            }
        }
    }
    Rta {
        response_times,
        failure: None,
    }
}

/// The RM schedulability test: the utilization bound first, then RTA
/// if the bound is exceeded.
pub(super) fn test(tasks: &TaskSet, utilization: f64) -> (Verdict, f64, Test) {
    let bound = utilization_bound(tasks.len());
    if utilization <= bound {
        return (Verdict::Schedulable, bound, Test::UtilizationBound);
    }
    let rta = response_time_analysis(tasks);
    (
        Verdict::from_bool(rta.is_schedulable()),
        bound,
        Test::ResponseTime(rta),
    )
}

fn divide_with_ceil(a: Duration, b: Duration) -> u64 {
    a / b + (a % b > 0) as u64
}
