//! Parameter kinds and their normalized mappings.

use crate::transform;

/// How a parameter's scaled domain maps onto the normalized host range.
///
/// Dispatch is a plain `match`, so the rendering side can convert values
/// without indirect calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamKind {
    /// Affine mapping: `normalized = (value - min) / (max - min)`.
    #[default]
    Linear,
    /// `normalized = ln(value / min) / ln(max / min)`. Requires `min > 0`.
    Logarithmic,
    /// Integer steps from `min` to `max` inclusive.
    Discrete,
    /// Named choices; scaled values are indices `0..labels.len()`.
    StringList(&'static [&'static str]),
}

impl ParamKind {
    /// Whether the kind takes whole-number steps.
    ///
    /// Stepped parameters jump between values instead of ramping.
    #[inline]
    pub const fn is_stepped(&self) -> bool {
        matches!(self, Self::Discrete | Self::StringList(_))
    }

    /// Normalized -> scaled for the domain `[min, max]`.
    #[inline]
    pub fn to_scaled(&self, normalized: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear => transform::normalized_to_scaled(normalized, min, max),
            Self::Logarithmic => transform::log_normalized_to_scaled(normalized, min, max),
            Self::Discrete | Self::StringList(_) => {
                transform::normalized_to_discrete(normalized, min as i64, max as i64) as f64
            }
        }
    }

    /// Scaled -> normalized for the domain `[min, max]`.
    #[inline]
    pub fn to_normalized(&self, scaled: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear => transform::scaled_to_normalized(scaled, min, max),
            Self::Logarithmic => transform::log_scaled_to_normalized(scaled, min, max),
            Self::Discrete | Self::StringList(_) => transform::discrete_to_normalized(
                libm::round(scaled) as i64,
                min as i64,
                max as i64,
            ),
        }
    }
}
