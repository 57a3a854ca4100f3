use crate::time::Duration;

use thiserror::Error;

/// Error type returned when a fixed point search fails.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq, PartialOrd)]
pub enum SearchFailure {
    /// The iteration grew beyond the given divergence threshold.
    #[error("no fixed point less than or equal to {limit} found (iteration reached {reached})")]
    DivergenceLimitExceeded { limit: Duration, reached: Duration },
}

pub type SearchResult = Result<Duration, SearchFailure>;

/// Largest divergence limit for which debug builds cross-check
/// [search] against an exhaustive scan.
#[cfg(debug_assertions)]
const BRUTE_FORCE_CHECK_LIMIT: Duration = 10_000;

/// Iterate `x ← workload(x)` from `initial` until the value stops
/// changing or exceeds `divergence_limit`.
///
/// `workload` must be monotonically non-decreasing and satisfy
/// `workload(x) >= initial` for all `x`, in which case the result is
/// the least fixed point of `workload`.
pub fn search<RHS>(initial: Duration, divergence_limit: Duration, workload: RHS) -> SearchResult
where
    RHS: Fn(Duration) -> Duration,
{
    let result = iterate(initial, divergence_limit, &workload);
    // In debug mode, compare against the brute-force solution.
    #[cfg(debug_assertions)]
    if divergence_limit <= BRUTE_FORCE_CHECK_LIMIT {
        debug_assert_eq!(
            result.is_ok(),
            brute_force_search(divergence_limit, &workload).is_ok()
        );
    }
    result
}

fn iterate<RHS>(initial: Duration, divergence_limit: Duration, workload: &RHS) -> SearchResult
where
    RHS: Fn(Duration) -> Duration,
{
    let mut assumed_response_time = initial;
    loop {
        let response_time_bound = workload(assumed_response_time);
        if response_time_bound > divergence_limit {
            // if we get here, we failed to converge => no solution
            return Err(SearchFailure::DivergenceLimitExceeded {
                limit: divergence_limit,
                reached: response_time_bound,
            });
        } else if response_time_bound == assumed_response_time {
            // we have converged
            return Ok(response_time_bound);
        }
        // continue iterating
        assumed_response_time = response_time_bound;
    }
}

/// Very slow, naive search for a fixed point up to the given
/// `divergence_limit`. Do not use --- use [search] instead.
#[cfg(debug_assertions)]
fn brute_force_search<RHS>(divergence_limit: Duration, workload: &RHS) -> SearchResult
where
    RHS: Fn(Duration) -> Duration,
{
    (1..=divergence_limit)
        .find(|r| workload(*r) == *r)
        .ok_or(SearchFailure::DivergenceLimitExceeded {
            limit: divergence_limit,
            reached: divergence_limit.saturating_add(1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_least_fixed_point() {
        // R = 3 + ceil(R / 4) * 1
        let rhs = |r: Duration| 3 + (r + 3) / 4;
        assert_eq!(search(3, 100, rhs), Ok(4));
    }

    #[test]
    fn constant_workload_converges_immediately() {
        assert_eq!(search(5, 5, |_| 5), Ok(5));
    }

    #[test]
    fn huge_divergence_limit_returns_promptly() {
        assert_eq!(search(1, Duration::MAX, |_| 5), Ok(5));
        assert_eq!(
            search(1, Duration::MAX - 1, |r| r.saturating_mul(2)),
            Err(SearchFailure::DivergenceLimitExceeded {
                limit: Duration::MAX - 1,
                reached: Duration::MAX
            })
        );
    }

    #[test]
    fn divergence_is_reported() {
        // R = 2 + ceil(R / 2) * 2 has no solution
        let rhs = |r: Duration| 2 + (r + 1) / 2 * 2;
        assert_eq!(
            search(2, 10, rhs),
            Err(SearchFailure::DivergenceLimitExceeded {
                limit: 10,
                reached: 12
            })
        );
    }
}
