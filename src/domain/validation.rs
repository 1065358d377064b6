//! Shared field-level validation helpers.
//!
//! Every weight- or time-like field in the tracker uses a 0.25 granularity
//! (quarter-pound plates, quarter-minute timings). The helpers here are the
//! single source of truth for that rule; entity validators delegate to them.

use crate::config::QUARTER_INCREMENT;

/// True iff `value` is non-negative and a multiple of [`QUARTER_INCREMENT`].
///
/// Quarter steps are exactly representable in binary floating point, so
/// dividing by the increment and checking for a fractional part is an
/// exact test.
pub fn is_quarter_step(value: f64) -> bool {
    value >= 0.0 && value.is_finite() && (value / QUARTER_INCREMENT).fract() == 0.0
}

/// Quarter-step rule for optional fields; `None` always passes.
pub fn is_quarter_step_opt(value: Option<f64>) -> bool {
    value.map_or(true, is_quarter_step)
}

/// True iff `value` lies in the inclusive range `[min, max]`.
pub fn in_range(value: i32, min: i32, max: i32) -> bool {
    (min..=max).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_step_accepts_multiples_of_a_quarter() {
        for v in [0.0, 0.25, 0.5, 0.75, 1.0, 135.25, 202.5, 500.75] {
            assert!(is_quarter_step(v), "{} should be valid", v);
        }
    }

    #[test]
    fn quarter_step_rejects_off_grid_values() {
        for v in [0.1, 0.3, 135.3, 100.126, 2.249] {
            assert!(!is_quarter_step(v), "{} should be invalid", v);
        }
    }

    #[test]
    fn quarter_step_rejects_negative_and_non_finite() {
        assert!(!is_quarter_step(-0.25));
        assert!(!is_quarter_step(f64::NAN));
        assert!(!is_quarter_step(f64::INFINITY));
    }

    #[test]
    fn quarter_step_opt_passes_none() {
        assert!(is_quarter_step_opt(None));
        assert!(is_quarter_step_opt(Some(1.25)));
        assert!(!is_quarter_step_opt(Some(1.3)));
    }

    #[test]
    fn in_range_is_inclusive() {
        assert!(in_range(1, 1, 50));
        assert!(in_range(50, 1, 50));
        assert!(!in_range(0, 1, 50));
        assert!(!in_range(51, 1, 50));
    }
}
