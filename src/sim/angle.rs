//! Angle math for the ring and its gate
//!
//! Everything here works in `[0, 2π)`. An arc is the sweep from `start` to
//! `end` going in the increasing-angle direction, so swapping the two
//! boundaries names the complementary arc.

use std::f32::consts::TAU;

/// Normalize any angle into `[0, 2π)`.
#[inline]
pub fn normalize(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round a tiny negative input up to exactly TAU
    if a < TAU { a } else { 0.0 }
}

/// Whether `angle` lies on the arc swept from `start` to `end` in the
/// increasing-angle direction. Both boundaries are inclusive; `start == end`
/// names a zero-length arc that matches only `start` itself.
pub fn in_arc(angle: f32, start: f32, end: f32) -> bool {
    let angle = normalize(angle);
    let start = normalize(start);
    let end = normalize(end);

    let arc_len = (end - start + TAU) % TAU;
    let rel = (angle - start + TAU) % TAU;
    rel <= arc_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn normalize_wraps_negatives() {
        assert!((normalize(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-6);
        assert!((normalize(-TAU - 0.5) - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn normalize_full_turns_collapse() {
        assert_eq!(normalize(0.0), 0.0);
        assert!(normalize(TAU) < 1e-6);
        assert!(normalize(3.0 * TAU + 0.25) - 0.25 < 1e-5);
    }

    #[test]
    fn in_arc_plain_sweep() {
        assert!(in_arc(1.0, 0.5, 2.0));
        assert!(!in_arc(3.0, 0.5, 2.0));
    }

    #[test]
    fn in_arc_wraps_through_zero() {
        // Arc from 350 degrees to 10 degrees passes through 0
        let start = 350.0_f32.to_radians();
        let end = 10.0_f32.to_radians();
        assert!(in_arc(0.0, start, end));
        assert!(in_arc(355.0_f32.to_radians(), start, end));
        assert!(!in_arc(PI, start, end));
    }

    #[test]
    fn in_arc_boundaries_inclusive() {
        assert!(in_arc(0.5, 0.5, 2.0));
        assert!(in_arc(2.0, 0.5, 2.0));
    }

    #[test]
    fn in_arc_degenerate_matches_only_start() {
        assert!(in_arc(1.0, 1.0, 1.0));
        assert!(in_arc(1.0 + TAU, 1.0, 1.0));
        assert!(!in_arc(1.0001, 1.0, 1.0));
    }

    proptest! {
        #[test]
        fn normalize_lands_in_range(a in -1000.0f32..1000.0) {
            let n = normalize(a);
            prop_assert!((0.0..TAU).contains(&n));
        }

        #[test]
        fn normalize_preserves_angle_mod_tau(a in -1000.0f32..1000.0) {
            let n = normalize(a);
            let turns = ((a - n) / TAU).round();
            prop_assert!((a - n - turns * TAU).abs() < 1e-3);
        }

        #[test]
        fn arc_and_complement_cover_the_circle(
            x in 0.0f32..TAU,
            start in 0.0f32..TAU,
            end in 0.0f32..TAU,
        ) {
            // Off the shared boundaries exactly one side claims the angle; on
            // the boundaries both may, so coverage is the invariant to check.
            prop_assert!(in_arc(x, start, end) || in_arc(x, end, start));
        }
    }
}
