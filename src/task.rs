/*! Periodic task model

A [Task] is the static description of a periodic activity as read from
the input: it never changes during analysis or simulation. A [TaskSet]
is a validated, ordered sequence of tasks. The position of a task in
the set is significant: among tasks with equal periods, the task
declared first has the higher rate-monotonic priority.
*/

use std::collections::HashSet;
use std::ops::Index;

use crate::error::InvalidTaskSet;
use crate::hyperperiod;
use crate::time::{Duration, Instant, Service};

/// A periodic task with an initial offset and a constrained or
/// arbitrary relative deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Short identifier used in the trace; unique within a task set.
    pub name: String,
    /// Release time of the first job.
    pub phase: Instant,
    /// Separation between two consecutive releases.
    pub period: Duration,
    /// Worst-case execution time of each job.
    pub wcet: Service,
    /// Relative deadline of each job.
    pub deadline: Duration,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        phase: Instant,
        period: Duration,
        wcet: Service,
        deadline: Duration,
    ) -> Self {
        Task {
            name: name.into(),
            phase,
            period,
            wcet,
            deadline,
        }
    }

    /// The fraction of the processor this task requires in the long run.
    pub fn utilization(&self) -> f64 {
        self.wcet as f64 / self.period as f64
    }

    fn validate(&self) -> Result<(), InvalidTaskSet> {
        let task = || self.name.clone();
        if self.period == 0 {
            Err(InvalidTaskSet::ZeroPeriod { task: task() })
        } else if self.wcet == 0 {
            Err(InvalidTaskSet::ZeroWcet { task: task() })
        } else if self.deadline == 0 {
            Err(InvalidTaskSet::ZeroDeadline { task: task() })
        } else {
            Ok(())
        }
    }
}

/// A non-empty, ordered collection of valid tasks with unique names
/// whose hyperperiod fits the time type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<Task>,
    hyperperiod: Duration,
}

impl TaskSet {
    /// Validate `tasks` and wrap them, preserving their order.
    pub fn new(tasks: Vec<Task>) -> Result<Self, InvalidTaskSet> {
        if tasks.is_empty() {
            return Err(InvalidTaskSet::Empty);
        }
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            task.validate()?;
            if !seen.insert(task.name.as_str()) {
                return Err(InvalidTaskSet::DuplicateName {
                    task: task.name.clone(),
                });
            }
        }
        let hyperperiod = hyperperiod::hyperperiod(&tasks)?;
        Ok(TaskSet { tasks, hyperperiod })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always `false`; provided for symmetry with [TaskSet::len].
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Total utilization `U = Σ wcet_i / period_i`.
    pub fn utilization(&self) -> f64 {
        self.tasks.iter().map(Task::utilization).sum()
    }

    /// The least common multiple of all periods.
    pub fn hyperperiod(&self) -> Duration {
        self.hyperperiod
    }
}

impl Index<usize> for TaskSet {
    type Output = Task;

    fn index(&self, index: usize) -> &Task {
        &self.tasks[index]
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
