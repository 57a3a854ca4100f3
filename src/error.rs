use thiserror::Error;

/// Reasons a collection of tasks cannot be analysed or simulated.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum InvalidTaskSet {
    #[error("the task set is empty")]
    Empty,
    #[error("task {task} has a period of zero")]
    ZeroPeriod { task: String },
    #[error("task {task} has a WCET of zero")]
    ZeroWcet { task: String },
    #[error("task {task} has a relative deadline of zero")]
    ZeroDeadline { task: String },
    #[error("task name {task} is used more than once")]
    DuplicateName { task: String },
    /// The least common multiple of all periods does not fit the time type.
    #[error("the hyperperiod of the task set overflows")]
    HyperperiodOverflow,
}

