/*! Tick-driven dispatch simulation

A [Simulator] replays the schedule of a [TaskSet] on a single, fully
preemptive processor, one tick at a time, over a fixed horizon
(normally the hyperperiod). The only difference between scheduling
algorithms is the [Policy] used to pick the job that runs in each tick.

In every tick `t < horizon` the simulator

1. releases a job of every task whose next release is `t`,
2. selects the highest-priority pending job (if any),
3. abandons every pending job whose absolute deadline is `<= t`, and
4. either stops the run, if any job was abandoned, or runs the selected
   job for one tick.

A run that reaches the horizon additionally reports jobs that are still
pending with an absolute deadline exactly at the horizon, since the
main loop never observes that instant.

Each run starts from a freshly initialized [JobState] per task, so
repeated runs over the same task set are independent.

[Simulator::run] keeps the whole trace in memory, which grows with the
horizon. Long hyperperiods should be consumed tick by tick through
[Simulator::run_with] instead.
*/

use std::convert::Infallible;

use tracing::{debug, warn};

use crate::analysis::Algorithm;
use crate::task::TaskSet;
use crate::time::{Duration, Instant};

mod policy;
mod state;

pub use policy::{Candidate, EarliestDeadlineFirst, Policy, RateMonotonic};
pub use state::JobState;

/// What happened in one tick of the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub time: Instant,
    /// Index of the task selected to run, or `None` if the processor idled.
    pub running: Option<usize>,
    /// Indices of the tasks whose jobs missed their deadline, in
    /// declaration order.
    pub missed: Vec<usize>,
}

/// The result of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every tick up to the horizon was simulated without a miss inside
    /// the main loop. `boundary` reports jobs whose deadline coincides
    /// with the horizon and which were still pending when it was reached.
    Completed {
        trace: Vec<Tick>,
        boundary: Option<Tick>,
    },
    /// The run stopped at the first tick in which a deadline was missed.
    /// `trace` ends with that tick.
    MissedAt {
        tick: Instant,
        trace: Vec<Tick>,
        missed: Vec<usize>,
    },
}

impl Outcome {
    /// The ticks simulated by the main loop, in order.
    pub fn trace(&self) -> &[Tick] {
        match self {
            Outcome::Completed { trace, .. } | Outcome::MissedAt { trace, .. } => trace,
        }
    }

    /// The extra tick at the horizon, if one was needed.
    pub fn boundary(&self) -> Option<&Tick> {
        match self {
            Outcome::Completed { boundary, .. } => boundary.as_ref(),
            Outcome::MissedAt { .. } => None,
        }
    }

    /// Whether the run reached the horizon without any deadline miss.
    pub fn is_clean(&self) -> bool {
        matches!(self, Outcome::Completed { boundary: None, .. })
    }

    /// The first tick at which a deadline miss was observed, including
    /// a miss at the horizon.
    pub fn first_miss(&self) -> Option<&Tick> {
        match self {
            Outcome::MissedAt { trace, .. } => trace.last(),
            Outcome::Completed { boundary, .. } => boundary.as_ref(),
        }
    }
}

/// How a streamed run ended; the ticks themselves went to the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The horizon was reached. See [Outcome::Completed].
    Completed { boundary: Option<Tick> },
    /// The run stopped at the first tick with a miss, which was the
    /// last tick passed to the callback.
    MissedAt { tick: Instant, missed: Vec<usize> },
}

impl Termination {
    /// Whether the run reached the horizon without any deadline miss.
    pub fn is_clean(&self) -> bool {
        matches!(self, Termination::Completed { boundary: None })
    }
}

/// Simulates one task set under one policy up to a horizon.
pub struct Simulator<'a, P: Policy> {
    tasks: &'a TaskSet,
    policy: P,
    horizon: Duration,
}

impl<'a, P: Policy> Simulator<'a, P> {
    pub fn new(tasks: &'a TaskSet, policy: P, horizon: Duration) -> Self {
        Simulator {
            tasks,
            policy,
            horizon,
        }
    }

    /// Run the simulation from time zero with freshly reset state,
    /// collecting every tick. Memory use is linear in the horizon.
    pub fn run(&self) -> Outcome {
        let mut trace = Vec::new();
        let result = self.run_with(|tick| {
            trace.push(tick);
            Ok::<(), Infallible>(())
        });
        match result {
            Ok(Termination::Completed { boundary }) => Outcome::Completed { trace, boundary },
            Ok(Termination::MissedAt { tick, missed }) => Outcome::MissedAt {
                tick,
                trace,
                missed,
            },
            Err(never) => match never {},
        }
    }

    /// Run the simulation from time zero with freshly reset state,
    /// handing each tick of the main loop to `on_tick` as soon as it is
    /// decided. The first error returned by `on_tick` aborts the run.
    pub fn run_with<E, F>(&self, mut on_tick: F) -> Result<Termination, E>
    where
        F: FnMut(Tick) -> Result<(), E>,
    {
        let mut states: Vec<JobState> = self.tasks.iter().map(JobState::initial).collect();
        let mut last_running = None;

        debug!(tasks = self.tasks.len(), horizon = self.horizon, "simulation started");

        for t in 0..self.horizon {
            for (task, state) in self.tasks.iter().zip(states.iter_mut()) {
                if state.is_due(t) {
                    state.release(task, t);
                }
            }

            let running = self.select(&states);

            let missed: Vec<usize> = states
                .iter_mut()
                .enumerate()
                .filter(|(_, state)| state.has_missed(t))
                .map(|(i, state)| {
                    state.abandon();
                    i
                })
                .collect();

            if !missed.is_empty() {
                warn!(tick = t, misses = missed.len(), "deadline missed, simulation stopped");
                on_tick(Tick {
                    time: t,
                    running,
                    missed: missed.clone(),
                })?;
                return Ok(Termination::MissedAt { tick: t, missed });
            }

            if let Some(i) = running {
                states[i].execute(&self.tasks[i]);
            }
            on_tick(Tick {
                time: t,
                running,
                missed: Vec::new(),
            })?;
            last_running = running;
        }

        let boundary_misses: Vec<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.absolute_deadline == self.horizon && state.is_pending())
            .map(|(i, _)| i)
            .collect();
        let boundary = if boundary_misses.is_empty() {
            None
        } else {
            warn!(tick = self.horizon, misses = boundary_misses.len(), "deadline missed at the horizon");
            Some(Tick {
                time: self.horizon,
                running: last_running,
                missed: boundary_misses,
            })
        };

        debug!(ticks = self.horizon, "simulation finished");
        Ok(Termination::Completed { boundary })
    }

    /// The pending job with the highest priority under the policy.
    fn select(&self, states: &[JobState]) -> Option<usize> {
        self.tasks
            .iter()
            .zip(states)
            .enumerate()
            .filter(|(_, (_, state))| state.is_pending())
            .map(|(index, (task, state))| Candidate { index, task, state })
            .min_by(|a, b| self.policy.compare(a, b))
            .map(|c| c.index)
    }
}

/// Simulate `tasks` under `algorithm` over one hyperperiod.
pub fn simulate(tasks: &TaskSet, algorithm: Algorithm) -> Outcome {
    Simulator::new(tasks, algorithm.policy(), tasks.hyperperiod()).run()
}
