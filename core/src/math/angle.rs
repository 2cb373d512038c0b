use std::f32::consts::{PI, TAU};

/// Wrapped difference `a1 - a2` between two phases, in `(-PI, PI]`.
///
/// The raw difference competes with a single 2*PI shift toward zero; the shift
/// direction is `-2*PI` when `a1 > a2` and `+2*PI` otherwise (including `a1 == a2`).
/// Differences beyond one full turn are first folded by whole turns so the
/// same comparison still lands in range.
pub fn angle_diff(a1: f32, a2: f32) -> f32 {
    let sign = if a1 > a2 { 1.0 } else { -1.0 };

    let mut angle = a1 - a2;
    if angle.abs() >= TAU {
        angle %= TAU;
    }

    let k = -sign * TAU;
    let wrapped = if (k + angle).abs() < angle.abs() {
        k + angle
    } else {
        angle
    };

    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn small_differences_pass_through() {
        assert_close(angle_diff(0.5, 0.2), 0.3);
        assert_close(angle_diff(0.2, 0.5), -0.3);
        assert_eq!(angle_diff(1.0, 1.0), 0.0);
    }

    #[test]
    fn crossing_the_branch_cut_wraps() {
        // 3.0 and -3.0 are 0.283 rad apart across PI.
        assert_close(angle_diff(3.0, -3.0), 6.0 - TAU);
        assert_close(angle_diff(-3.0, 3.0), TAU - 6.0);
    }

    #[test]
    fn exact_half_turn_stays_positive() {
        assert_close(angle_diff(PI, 0.0), PI);
        assert_close(angle_diff(0.0, PI), PI);
    }

    #[test]
    fn antisymmetric_up_to_wrap() {
        let pairs = [(0.1, 2.9), (-2.5, 1.7), (3.1, -3.1), (0.7, -0.4), (12.0, -5.3)];
        for (a, b) in pairs {
            let forward = angle_diff(a, b);
            let backward = angle_diff(b, a);
            let sum = (forward + backward).rem_euclid(TAU);
            assert!(sum < 1e-4 || (TAU - sum) < 1e-4, "{a} {b} -> {sum}");
        }
    }

    #[test]
    fn result_always_in_half_open_interval() {
        let mut a = -20.0_f32;
        while a < 20.0 {
            let mut b = -20.0_f32;
            while b < 20.0 {
                let diff = angle_diff(a, b);
                assert!(diff > -PI && diff <= PI + 1e-6, "{a} {b} -> {diff}");
                b += 0.37;
            }
            a += 0.41;
        }
    }
}
