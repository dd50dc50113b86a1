//! Conversions between normalized, scaled and discrete parameter values.
//!
//! Hosts automate parameters as normalized values in \[0.0, 1.0\]. DSP code
//! works in scaled (physical) units such as Hz or dB, or in discrete steps.
//! The functions here are the single source of truth for those mappings.
//!
//! All functions are pure and total over their documented domain. The
//! caller must supply a non-degenerate domain (`max > min`); this is checked
//! once when a [`ParamSpec`](crate::ParamSpec) is built, never per call.
//!
//! # Example
//!
//! ```rust
//! use resona_core::transform::{normalized_to_discrete, normalized_to_scaled, scaled_to_normalized};
//!
//! assert_eq!(scaled_to_normalized(7510.0, 20.0, 15000.0), 0.5);
//! assert_eq!(normalized_to_scaled(0.5, 20.0, 15000.0), 7510.0);
//!
//! // The top edge maps to `max`, not `max + 1`.
//! assert_eq!(normalized_to_discrete(1.0, 1, 10), 10);
//! ```

/// Converts a scaled value in `[min, max]` to normalized \[0.0, 1.0\].
///
/// Values outside the domain extrapolate linearly.
#[inline]
pub fn scaled_to_normalized(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Converts a normalized value to the scaled domain `[min, max]`.
///
/// Inverse of [`scaled_to_normalized`] up to floating-point rounding.
/// Normalized values outside \[0.0, 1.0\] extrapolate rather than clamp.
#[inline]
pub fn normalized_to_scaled(value: f64, min: f64, max: f64) -> f64 {
    value * (max - min) + min
}

/// Converts an integer step in `[min, max]` to a normalized value.
#[inline]
pub fn discrete_to_normalized(value: i64, min: i64, max: i64) -> f64 {
    (value - min) as f64 / (max - min) as f64
}

/// Converts a normalized value to an integer step in `[min, max]`.
///
/// The normalized range is split into `max - min + 1` equal buckets so every
/// step gets the same share of host automation travel. A normalized value of
/// exactly `1.0` would land in bucket `max - min + 1`; it is clamped to the
/// last bucket so the result is `max`.
#[inline]
pub fn normalized_to_discrete(value: f64, min: i64, max: i64) -> i64 {
    let range = max - min;
    let bucket = libm::floor(value * (range + 1) as f64) as i64;
    bucket.min(range) + min
}

/// Logarithmic mapping from scaled to normalized. Requires `min > 0`.
///
/// `normalized = ln(value / min) / ln(max / min)`
#[inline]
pub fn log_scaled_to_normalized(value: f64, min: f64, max: f64) -> f64 {
    libm::log(value / min) / libm::log(max / min)
}

/// Logarithmic mapping from normalized to scaled. Requires `min > 0`.
///
/// `value = min * (max / min)^normalized`
#[inline]
pub fn log_normalized_to_scaled(value: f64, min: f64, max: f64) -> f64 {
    min * libm::pow(max / min, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint() {
        assert_eq!(scaled_to_normalized(7510.0, 20.0, 15000.0), 0.5);
        assert_eq!(normalized_to_scaled(0.5, 20.0, 15000.0), 7510.0);
    }

    #[test]
    fn linear_endpoints() {
        assert_eq!(scaled_to_normalized(-1.0, -1.0, 1.0), 0.0);
        assert_eq!(scaled_to_normalized(1.0, -1.0, 1.0), 1.0);
        assert_eq!(normalized_to_scaled(0.0, -1.0, 1.0), -1.0);
        assert_eq!(normalized_to_scaled(1.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn linear_extrapolates_outside_unit_range() {
        assert_eq!(normalized_to_scaled(2.0, 0.0, 100.0), 200.0);
        assert_eq!(normalized_to_scaled(-0.5, 0.0, 100.0), -50.0);
    }

    #[test]
    fn discrete_top_edge_clamps_to_max() {
        assert_eq!(normalized_to_discrete(1.0, 1, 10), 10);
        assert_eq!(normalized_to_discrete(1.0, 0, 1), 1);
        assert_eq!(normalized_to_discrete(1.0, 1, 200), 200);
    }

    #[test]
    fn discrete_buckets_are_even() {
        // Two steps: [0, 0.5) -> 1, [0.5, 1.0] -> 2
        assert_eq!(normalized_to_discrete(0.0, 1, 2), 1);
        assert_eq!(normalized_to_discrete(0.49, 1, 2), 1);
        assert_eq!(normalized_to_discrete(0.5, 1, 2), 2);
        assert_eq!(normalized_to_discrete(0.99, 1, 2), 2);
    }

    #[test]
    fn discrete_roundtrip_every_step() {
        for step in 1..=10 {
            let n = discrete_to_normalized(step, 1, 10);
            assert_eq!(normalized_to_discrete(n, 1, 10), step, "step {step}");
        }
    }

    #[test]
    fn log_endpoints_and_midpoint() {
        assert!(log_scaled_to_normalized(20.0, 20.0, 20000.0).abs() < 1e-12);
        assert!((log_scaled_to_normalized(20000.0, 20.0, 20000.0) - 1.0).abs() < 1e-12);

        // Geometric mean sits at the normalized midpoint.
        let mid = log_normalized_to_scaled(0.5, 20.0, 20000.0);
        assert!((mid - libm::sqrt(20.0 * 20000.0)).abs() < 1e-9);
    }
}
