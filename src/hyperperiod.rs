//! Number-theoretic helpers used to compute the simulation horizon.

use crate::error::InvalidTaskSet;
use crate::task::Task;
use crate::time::{Duration, Time};

/// Greatest common divisor by Euclid's algorithm; `gcd(a, 0) == a`.
pub fn gcd(a: Time, b: Time) -> Time {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple of `a` and `b`, or `None` if it overflows.
///
/// Dividing before multiplying keeps intermediate values as small as
/// the result itself.
pub fn lcm(a: Time, b: Time) -> Option<Time> {
    match gcd(a, b) {
        0 => Some(0),
        g => (a / g).checked_mul(b),
    }
}

/// The hyperperiod of a sequence of tasks: the LCM of all periods,
/// folded from the first task's period.
pub fn hyperperiod(tasks: &[Task]) -> Result<Duration, InvalidTaskSet> {
    let (first, rest) = tasks.split_first().ok_or(InvalidTaskSet::Empty)?;
    rest.iter().try_fold(first.period, |acc, task| {
        lcm(acc, task.period).ok_or(InvalidTaskSet::HyperperiodOverflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::task;

    #[test]
    fn euclid() {
        assert_eq!(gcd(12, 0), 12);
        assert_eq!(gcd(0, 12), 12);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
    }

    #[test]
    fn least_common_multiple() {
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(5, 5), Some(5));
        assert_eq!(lcm(7, 3), Some(21));
        assert_eq!(lcm(Time::MAX, 2), None);
    }

    #[test]
    fn hyperperiod_of_task_set() {
        let tasks = vec![
            task("T1", 0, 4, 1, 4),
            task("T2", 0, 6, 2, 6),
            task("T3", 2, 10, 1, 10),
        ];
        let h = hyperperiod(&tasks).unwrap();
        assert_eq!(h, 60);
        for t in &tasks {
            assert_eq!(h % t.period, 0);
        }
    }

    #[test]
    fn single_task_hyperperiod_is_its_period() {
        assert_eq!(hyperperiod(&[task("T", 5, 7, 1, 7)]), Ok(7));
    }

    #[test]
    fn empty_and_overflowing_inputs_fail() {
        assert_eq!(hyperperiod(&[]), Err(InvalidTaskSet::Empty));
        let huge = vec![
            task("A", 0, Time::MAX - 1, 1, 10),
            task("B", 0, Time::MAX - 2, 1, 10),
        ];
        assert_eq!(hyperperiod(&huge), Err(InvalidTaskSet::HyperperiodOverflow));
    }
}
