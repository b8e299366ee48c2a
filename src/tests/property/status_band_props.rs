//! Property-based tests for score banding
//!
//! Tests invariants:
//! - A higher score never lands in a lower band
//! - Scaling score and maximum together keeps the band
//! - A non-zero maximum always yields a known band
//! - The percentage agrees with the band thresholds

use proptest::prelude::*;

use crate::core::models::Status;
use crate::core::presentation::{score_percent, status_band, status_to_color, ColorToken};

/// Rank bands from worst to best.
fn rank(status: Status) -> u8 {
    match status {
        Status::Unknown => 0,
        Status::Critical => 1,
        Status::NeedsImprovement => 2,
        Status::Good => 3,
        Status::Excellent => 4,
    }
}

proptest! {
    #[test]
    fn band_is_monotonic_in_score(max in 1u32..10_000, a in 0u32..10_000, b in 0u32..10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(status_band(lo, max)) <= rank(status_band(hi, max)));
    }

    #[test]
    fn band_is_scale_invariant(score in 0u32..1_000, max in 1u32..1_000, k in 1u32..1_000) {
        prop_assert_eq!(status_band(score, max), status_band(score * k, max * k));
    }

    #[test]
    fn non_zero_max_is_never_unknown(score in any::<u32>(), max in 1u32..) {
        prop_assert_ne!(status_band(score, max), Status::Unknown);
    }

    #[test]
    fn zero_max_is_unknown_and_gray(score in any::<u32>()) {
        prop_assert_eq!(status_band(score, 0), Status::Unknown);
        prop_assert_eq!(status_to_color(status_band(score, 0)), ColorToken::Gray);
    }

    #[test]
    fn percent_agrees_with_band(score in 0u32..=100) {
        let expected = match score_percent(score, 100) {
            p if p >= 80 => Status::Excellent,
            p if p >= 60 => Status::Good,
            p if p >= 40 => Status::NeedsImprovement,
            _ => Status::Critical,
        };
        prop_assert_eq!(status_band(score, 100), expected);
    }
}
