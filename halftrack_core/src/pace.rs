//! Pace model: reference pace from race results, target paces by offset.
//!
//! The reference pace is roughly a 5K-effort pace in seconds per mile.
//! Longer results are scaled to 5K with the Riegel endurance exponent.

use crate::{Paces, FIVE_K_MILES, HALF_MARATHON_MILES, TEN_K_MILES};

/// Riegel endurance-decay exponent
pub const RIEGEL_EXPONENT: f64 = 1.06;

/// Reference pace used when no race times are known (9:00/mi)
pub const DEFAULT_REFERENCE_PACE: f64 = 540.0;

/// 5K-equivalent pace (s/mi) implied by a 10K finish time
fn ten_k_equivalent_pace(ten_k_seconds: f64) -> f64 {
    ten_k_seconds * (FIVE_K_MILES / TEN_K_MILES).powf(RIEGEL_EXPONENT) / FIVE_K_MILES
}

/// Riegel extrapolation of a finish time to another distance
fn riegel(seconds: f64, from_miles: f64, to_miles: f64) -> f64 {
    seconds * (to_miles / from_miles).powf(RIEGEL_EXPONENT)
}

fn known(seconds: Option<u32>) -> Option<f64> {
    seconds.filter(|&s| s > 0).map(f64::from)
}

/// Single reference pace from the known race times.
///
/// With both times the 10K-derived pace is weighted 55%.
pub fn reference_pace(five_k_seconds: Option<u32>, ten_k_seconds: Option<u32>) -> f64 {
    match (known(five_k_seconds), known(ten_k_seconds)) {
        (Some(five), Some(ten)) => {
            (five / FIVE_K_MILES) * 0.45 + ten_k_equivalent_pace(ten) * 0.55
        }
        (Some(five), None) => five / FIVE_K_MILES,
        (None, Some(ten)) => ten_k_equivalent_pace(ten),
        (None, None) => DEFAULT_REFERENCE_PACE,
    }
}

/// Target paces for every workout type
pub fn calc_paces(five_k_seconds: Option<u32>, ten_k_seconds: Option<u32>) -> Paces {
    Paces::from_reference(reference_pace(five_k_seconds, ten_k_seconds))
}

/// Estimated half-marathon finish in seconds, if any race time is known.
///
/// Blends 40% 5K-derived with 60% 10K-derived; this differs
/// from the 45/55 split in [`reference_pace`].
pub fn estimate_half(five_k_seconds: Option<u32>, ten_k_seconds: Option<u32>) -> Option<f64> {
    let from_five = known(five_k_seconds).map(|s| riegel(s, FIVE_K_MILES, HALF_MARATHON_MILES));
    let from_ten = known(ten_k_seconds).map(|s| riegel(s, TEN_K_MILES, HALF_MARATHON_MILES));

    match (from_five, from_ten) {
        (Some(five), Some(ten)) => Some(five * 0.4 + ten * 0.6),
        (five, ten) => five.or(ten),
    }
}
