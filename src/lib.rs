/*! Schedulability analysis and simulation of periodic task sets

This crate analyses a set of periodic tasks on a single, fully
preemptive processor under either rate-monotonic (**RM**) or
earliest-deadline-first (**EDF**) scheduling, and then simulates the
schedule tick by tick over one hyperperiod.

- [analysis] decides schedulability offline (utilization bounds and
  response-time analysis);
- [simulation] replays the schedule and stops at the first deadline
  miss;
- [report] renders both into a line-oriented text report;
- [input] decodes task sets from comma-separated text.

Context switches are free, jobs never block, and every job consumes
its WCET in whole ticks.
*/

pub mod analysis;
pub mod error;
pub mod fixed_point;
pub mod hyperperiod;
pub mod input;
pub mod report;
pub mod simulation;
pub mod task;
pub mod time;

pub use analysis::{analyze, Algorithm, Analysis, Verdict};
pub use error::InvalidTaskSet;
pub use simulation::{simulate, Outcome, Termination, Tick};
pub use task::{Task, TaskSet};
