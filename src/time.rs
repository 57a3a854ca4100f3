//! The simulation advances in whole ticks, so all timing parameters are
//! plain unsigned integers.

/// One tick of the discrete simulation clock.
pub type Time = u64;

/// Hint that a time value is an absolute point on the simulation clock
/// (a release time, an absolute deadline, a tick).
pub type Instant = Time;

/// Hint that a time value is the length of an interval (a period, a
/// relative deadline, a response time).
pub type Duration = Time;

/// Hint that a time value is an amount of processor service (a WCET or
/// the remaining cost of a job).
pub type Service = Time;
