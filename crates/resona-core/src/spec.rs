//! Static parameter descriptors.
//!
//! A [`ParamSpec`] describes one parameter's identity and numeric domain.
//! Specs are built once at startup, validated, collected into a
//! [`ParamTable`](crate::ParamTable) and then shared read-only between the
//! editing side and the rendering side.
//!
//! All values in a spec (`min`, `max`, `default`, `initial`) are scaled
//! (physical) units. The [`ParamKind`] decides how those map onto the
//! normalized \[0.0, 1.0\] host range.
//!
//! # Example
//!
//! ```rust
//! use resona_core::{ParamId, ParamKind, ParamSpec, ParamUnit};
//!
//! let freq = ParamSpec::log(ParamId(5), "Resonator Frequency", "Res Freq", 20.0, 15000.0, 500.0)
//!     .with_string_id("res_freq")
//!     .with_unit(ParamUnit::Hertz)
//!     .with_initial(200.0);
//!
//! assert!(freq.validate().is_ok());
//! assert_eq!(freq.kind, ParamKind::Logarithmic);
//! assert!((freq.to_scaled(freq.to_normalized(440.0)) - 440.0).abs() < 1e-9);
//! ```

use core::fmt;

use crate::error::DomainViolation;
use crate::kind::ParamKind;
use crate::transform;

/// Stable parameter identifier.
///
/// Ids are dense and contiguous within a table (`0..N-1`) so they double as
/// array indices into [`ParamState`](crate::ParamState). Once released, an id
/// must never change meaning: it is part of the persisted state layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamId(pub u32);

impl ParamId {
    /// The id as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParamId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Parameter capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Output parameter written by the rendering side (meters, timing).
    pub const READ_ONLY: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit suffix for displaying scaled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Hertz.
    Hertz,
    /// Percent.
    Percent,
    /// Meters.
    Meters,
    /// Meters per second.
    MetersPerSecond,
    /// Seconds.
    Seconds,
    /// Dimensionless.
    #[default]
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Percent => "%",
            ParamUnit::Meters => " m",
            ParamUnit::MetersPerSecond => " m/s",
            ParamUnit::Seconds => " s",
            ParamUnit::None => "",
        }
    }
}

/// Immutable descriptor of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Stable id, also the index into the parameter state.
    pub id: ParamId,
    /// Full name for host display.
    pub name: &'static str,
    /// Short name for narrow displays.
    pub short_name: &'static str,
    /// Stable textual id used by presets. Empty means "not addressable by name".
    pub string_id: &'static str,
    /// Scaling curve.
    pub kind: ParamKind,
    /// Minimum scaled value.
    pub min: f64,
    /// Maximum scaled value.
    pub max: f64,
    /// Value the host resets to.
    pub default: f64,
    /// Value a fresh plugin instance starts with.
    pub initial: f64,
    /// Display unit.
    pub unit: ParamUnit,
    /// Decimal places when formatting.
    pub precision: u8,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamSpec {
    /// Linear parameter. `initial` starts equal to `default`.
    pub const fn linear(
        id: ParamId,
        name: &'static str,
        short_name: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self {
            id,
            name,
            short_name,
            string_id: "",
            kind: ParamKind::Linear,
            min,
            max,
            default,
            initial: default,
            unit: ParamUnit::None,
            precision: 1,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Logarithmic parameter (`min` must be positive).
    pub const fn log(
        id: ParamId,
        name: &'static str,
        short_name: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self::linear(id, name, short_name, min, max, default).with_kind(ParamKind::Logarithmic)
    }

    /// Integer-stepped parameter.
    pub const fn discrete(
        id: ParamId,
        name: &'static str,
        short_name: &'static str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Self {
        Self::linear(id, name, short_name, min as f64, max as f64, default as f64)
            .with_kind(ParamKind::Discrete)
            .with_precision(0)
    }

    /// Choice parameter over `labels`; scaled values are label indices.
    pub const fn string_list(
        id: ParamId,
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: usize,
    ) -> Self {
        let max = if labels.is_empty() { 0 } else { labels.len() - 1 };
        Self::linear(id, name, short_name, 0.0, max as f64, default as f64)
            .with_kind(ParamKind::StringList(labels))
            .with_precision(0)
    }

    /// Sets the scaling kind.
    pub const fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the preset-facing string id.
    pub const fn with_string_id(mut self, string_id: &'static str) -> Self {
        self.string_id = string_id;
        self
    }

    /// Sets the initial value for fresh instances.
    pub const fn with_initial(mut self, initial: f64) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets display precision (decimal places).
    pub const fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Sets capability flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Marks the parameter as a rendering-side output.
    pub const fn read_only(self) -> Self {
        self.with_flags(ParamFlags::READ_ONLY)
    }

    /// Whether the rendering side writes this parameter.
    #[inline]
    pub const fn is_read_only(&self) -> bool {
        self.flags.contains(ParamFlags::READ_ONLY)
    }

    /// Number of discrete steps (`max - min`), or 0 for continuous kinds.
    pub fn step_count(&self) -> u32 {
        if self.kind.is_stepped() {
            (self.max - self.min) as u32
        } else {
            0
        }
    }

    /// Checks the domain invariants.
    ///
    /// - `min < max`, both finite
    /// - `min <= default, initial <= max`
    /// - logarithmic kinds need `min > 0`
    /// - stepped kinds need integral bounds
    pub fn validate(&self) -> Result<(), DomainViolation> {
        let (id, min, max) = (self.id, self.min, self.max);
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(DomainViolation::Degenerate { id, min, max });
        }
        match self.kind {
            ParamKind::Logarithmic if min <= 0.0 => {
                return Err(DomainViolation::NonPositiveLogMinimum { id, min });
            }
            ParamKind::Discrete | ParamKind::StringList(_)
                if libm::trunc(min) != min || libm::trunc(max) != max =>
            {
                return Err(DomainViolation::FractionalDiscreteBounds { id, min, max });
            }
            _ => {}
        }
        for (which, value) in [("default", self.default), ("initial", self.initial)] {
            if !(min..=max).contains(&value) {
                return Err(DomainViolation::OutOfDomain {
                    id,
                    which,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Scaled -> normalized.
    #[inline]
    pub fn to_normalized(&self, scaled: f64) -> f64 {
        self.kind.to_normalized(scaled, self.min, self.max)
    }

    /// Normalized -> scaled. Values outside \[0.0, 1.0\] extrapolate for
    /// continuous kinds.
    #[inline]
    pub fn to_scaled(&self, normalized: f64) -> f64 {
        self.kind.to_scaled(normalized, self.min, self.max)
    }

    /// Integer step -> normalized.
    #[inline]
    pub fn from_discrete(&self, step: i64) -> f64 {
        transform::discrete_to_normalized(step, self.min as i64, self.max as i64)
    }

    /// Normalized -> integer step, with the top edge clamped to `max`.
    #[inline]
    pub fn to_discrete(&self, normalized: f64) -> i64 {
        transform::normalized_to_discrete(normalized, self.min as i64, self.max as i64)
    }

    /// Normalized default value.
    #[inline]
    pub fn default_normalized(&self) -> f64 {
        self.to_normalized(self.default)
    }

    /// Normalized initial value.
    #[inline]
    pub fn initial_normalized(&self) -> f64 {
        self.to_normalized(self.initial)
    }

    /// Clamps a scaled value into `[min, max]`.
    #[inline]
    pub fn clamp(&self, scaled: f64) -> f64 {
        scaled.clamp(self.min, self.max)
    }

    /// Label for a string-list parameter at the given scaled index.
    ///
    /// Indices below the first label, and NaN, have no label.
    pub fn label(&self, scaled: f64) -> Option<&'static str> {
        if scaled.is_nan() || scaled < self.min {
            return None;
        }
        match self.kind {
            ParamKind::StringList(labels) => labels.get(libm::round(scaled) as usize).copied(),
            _ => None,
        }
    }

    /// Formats a scaled value with unit and precision.
    ///
    /// ```rust
    /// use resona_core::{ParamId, ParamSpec, ParamUnit};
    ///
    /// let mix = ParamSpec::linear(ParamId(1), "Mix", "Mix", 0.0, 100.0, 100.0)
    ///     .with_unit(ParamUnit::Percent)
    ///     .with_precision(0);
    /// assert_eq!(format!("{}", mix.display(42.4)), "42%");
    /// ```
    pub fn display(&self, scaled: f64) -> ValueDisplay<'_> {
        ValueDisplay { spec: self, scaled }
    }

    /// Parses user text into a scaled value.
    ///
    /// Accepts a bare number, a number followed by the unit suffix, or one of
    /// the labels of a string-list parameter. The result is clamped into the
    /// domain.
    pub fn parse_value(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        if let ParamKind::StringList(labels) = self.kind {
            if let Some(index) = labels.iter().position(|l| l.eq_ignore_ascii_case(text)) {
                return Some(index as f64);
            }
        }
        let suffix = self.unit.suffix().trim();
        let number = if suffix.is_empty() {
            text
        } else {
            text.strip_suffix(suffix).unwrap_or(text).trim_end()
        };
        let value: f64 = number.parse().ok()?;
        let value = if self.kind.is_stepped() {
            libm::round(value)
        } else {
            value
        };
        Some(self.clamp(value))
    }
}

/// [`fmt::Display`] adapter returned by [`ParamSpec::display`].
pub struct ValueDisplay<'a> {
    spec: &'a ParamSpec,
    scaled: f64,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = self.spec.label(self.scaled) {
            return f.write_str(label);
        }
        write!(
            f,
            "{:.*}{}",
            self.spec.precision as usize,
            self.scaled,
            self.spec.unit.suffix()
        )
    }
}
