//! Test for *earliest-deadline first* (**EDF**) scheduling

use super::{Test, Verdict};

/// EDF admits any task set whose total utilization does not exceed the
/// capacity of the processor.
pub const UTILIZATION_BOUND: f64 = 1.0;

pub(super) fn test(utilization: f64) -> (Verdict, f64, Test) {
    (
        Verdict::from_bool(utilization <= UTILIZATION_BOUND),
        UTILIZATION_BOUND,
        Test::Utilization,
    )
}
