use assert_approx_eq::assert_approx_eq;
use itertools::iproduct;

use crate::analysis::{analyze, edf, rm, Algorithm, Test, Verdict};
use crate::fixed_point::SearchFailure;
use crate::task::TaskSet;
use crate::tests::{implicit, task, two_tasks};

#[test]
fn liu_layland_bounds() {
    assert_approx_eq!(rm::utilization_bound(0), 1.0);
    assert_approx_eq!(rm::utilization_bound(1), 1.0);
    assert_approx_eq!(rm::utilization_bound(2), 0.828, 0.001);
    assert_approx_eq!(rm::utilization_bound(3), 0.780, 0.001);
    assert_approx_eq!(rm::utilization_bound(5), 0.743, 0.001);
    assert!(rm::utilization_bound(1000) > std::f64::consts::LN_2);
}

#[test]
fn rm_two_tasks_pass_the_bound_test() {
    let a = analyze(&two_tasks(), Algorithm::RateMonotonic);
    assert_eq!(a.verdict, Verdict::Schedulable);
    assert_eq!(a.test, Test::UtilizationBound);
    assert_eq!(a.hyperperiod, 12);
    assert_approx_eq!(a.utilization, 0.583, 0.001);
    assert_approx_eq!(a.bound, 2.0 * (2f64.sqrt() - 1.0));
}

#[test]
fn rm_falls_back_to_response_time_analysis() {
    // U = 0.95 exceeds the bound for four tasks, but RTA succeeds.
    let ts = implicit(&[(1, 4), (1, 5), (3, 9), (3, 18)]);
    let a = analyze(&ts, Algorithm::RateMonotonic);
    assert_eq!(a.verdict, Verdict::Schedulable);
    assert_approx_eq!(a.bound, rm::utilization_bound(4));
    match a.test {
        Test::ResponseTime(rta) => {
            assert_eq!(rta.response_times, vec![1, 2, 7, 18]);
            assert_eq!(rta.failure, None);
        }
        other => panic!("unexpected test {:?}", other),
    }
}

#[test]
fn rm_harmonic_full_utilization_is_schedulable() {
    let ts = implicit(&[(1, 2), (2, 4)]);
    let a = analyze(&ts, Algorithm::RateMonotonic);
    assert_eq!(a.verdict, Verdict::Schedulable);
    assert_eq!(
        a.test,
        Test::ResponseTime(rm::Rta {
            response_times: vec![1, 4],
            failure: None
        })
    );
}

/// Example 2 in "Fixed Priority Scheduling of Periodic Task Sets
/// with Arbitrary Deadlines", John P. Lehoczky, RTSS 1990, with
/// deadlines equal to periods.
#[test]
fn rm_rta_reports_first_failing_task() {
    let ts = implicit(&[(52, 100), (52, 140)]);
    let a = analyze(&ts, Algorithm::RateMonotonic);
    assert_eq!(a.verdict, Verdict::NotSchedulable);
    assert_eq!(
        a.test,
        Test::ResponseTime(rm::Rta {
            response_times: vec![52],
            failure: Some((
                1,
                SearchFailure::DivergenceLimitExceeded {
                    limit: 140,
                    reached: 156
                }
            )),
        })
    );
}

#[test]
fn rm_rta_stops_at_first_failure() {
    // T1 cannot meet its own deadline; T2 is never analysed.
    let ts = TaskSet::new(vec![task("T1", 0, 10, 5, 4), task("T2", 0, 20, 1, 20)]).unwrap();
    let rta = rm::response_time_analysis(&ts);
    assert!(rta.response_times.is_empty());
    assert_eq!(rta.failure.map(|(i, _)| i), Some(0));
}

#[test]
fn rm_rta_saturates_instead_of_overflowing() {
    // A's interference on B exceeds u64 on the second iteration.
    let ts = TaskSet::new(vec![
        task("B", 0, 2, 1, 1 << 63),
        task("A", 0, 1, 1 << 62, 1 << 63),
    ])
    .unwrap();
    let a = analyze(&ts, Algorithm::RateMonotonic);
    assert_eq!(a.verdict, Verdict::NotSchedulable);
    assert_eq!(
        a.test,
        Test::ResponseTime(rm::Rta {
            response_times: vec![],
            failure: Some((
                0,
                SearchFailure::DivergenceLimitExceeded {
                    limit: 1 << 63,
                    reached: u64::MAX
                }
            )),
        })
    );
}

#[test]
fn rm_equal_periods_prefer_earlier_declaration() {
    let ts = implicit(&[(1, 4), (1, 4), (1, 4)]);
    assert!(rm::has_higher_priority(&ts, 0, 1));
    assert!(!rm::has_higher_priority(&ts, 1, 0));
    assert!(!rm::has_higher_priority(&ts, 1, 1));
    assert_eq!(rm::response_time(&ts, 0), Ok(1));
    assert_eq!(rm::response_time(&ts, 1), Ok(2));
    assert_eq!(rm::response_time(&ts, 2), Ok(3));
}

#[test]
fn rm_interference_ignores_lower_priority_tasks() {
    // declared out of period order: T2 has the shorter period
    let ts = TaskSet::new(vec![task("T1", 0, 10, 3, 10), task("T2", 0, 5, 2, 5)]).unwrap();
    assert_eq!(rm::response_time(&ts, 1), Ok(2));
    // R = 3 + ceil(R / 5) * 2 converges at 5
    assert_eq!(rm::response_time(&ts, 0), Ok(5));
}

#[test]
fn edf_utilization_test() {
    let ok = analyze(&implicit(&[(2, 4), (3, 6)]), Algorithm::EarliestDeadlineFirst);
    assert_eq!(ok.verdict, Verdict::Schedulable);
    assert_eq!(ok.test, Test::Utilization);
    assert_approx_eq!(ok.bound, edf::UTILIZATION_BOUND);
    assert_approx_eq!(ok.utilization, 1.0);

    let overloaded = analyze(&implicit(&[(3, 4), (3, 6)]), Algorithm::EarliestDeadlineFirst);
    assert_eq!(overloaded.verdict, Verdict::NotSchedulable);
    assert_approx_eq!(overloaded.utilization, 1.25);
}

#[test]
fn verdict_and_algorithm_labels() {
    assert_eq!(Verdict::Schedulable.to_string(), "SCHEDULABLE");
    assert_eq!(Verdict::NotSchedulable.to_string(), "NOT SCHEDULABLE");
    assert_eq!(Algorithm::RateMonotonic.to_string(), "RM");
    assert_eq!(Algorithm::EarliestDeadlineFirst.to_string(), "EDF");
}

#[test]
fn analysis_utilization_matches_definition() {
    for (c1, t1, c2, t2) in iproduct!(1..=4u64, 2..=9u64, 1..=4u64, 2..=9u64) {
        let ts = implicit(&[(c1, t1), (c2, t2)]);
        let expected = c1 as f64 / t1 as f64 + c2 as f64 / t2 as f64;
        for algorithm in [Algorithm::RateMonotonic, Algorithm::EarliestDeadlineFirst] {
            let a = analyze(&ts, algorithm);
            assert_approx_eq!(a.utilization, expected);
            for t in ts.iter() {
                assert_eq!(a.hyperperiod % t.period, 0);
            }
        }
    }
}

#[test]
fn bound_test_never_contradicts_rta() {
    for (c1, t1, c2, t2, c3, t3) in iproduct!(1..=3u64, 2..=8u64, 1..=3u64, 2..=8u64, 1..=3u64, 2..=8u64) {
        if c1 > t1 || c2 > t2 || c3 > t3 {
            continue;
        }
        let ts = implicit(&[(c1, t1), (c2, t2), (c3, t3)]);
        if ts.utilization() <= rm::utilization_bound(ts.len()) {
            let rta = rm::response_time_analysis(&ts);
            assert!(rta.is_schedulable(), "bound passed but RTA failed for {:?}", ts);
        }
    }
}
