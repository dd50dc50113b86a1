//! Error types for parameter specs, tables and state blobs.

use crate::ParamId;
use thiserror::Error;

/// A parameter spec whose numeric domain is unusable.
///
/// Raised while building a [`ParamSpec`](crate::ParamSpec) or
/// [`ParamTable`](crate::ParamTable). This is a configuration bug, so plugins
/// treat it as fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainViolation {
    /// `max <= min` (or either bound is not finite).
    #[error("parameter {id}: degenerate domain [{min}, {max}]")]
    Degenerate {
        /// Offending parameter.
        id: ParamId,
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },

    /// Default or initial value lies outside `[min, max]`.
    #[error("parameter {id}: {which} value {value} outside [{min}, {max}]")]
    OutOfDomain {
        /// Offending parameter.
        id: ParamId,
        /// `"default"` or `"initial"`.
        which: &'static str,
        /// The value that does not fit.
        value: f64,
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },

    /// Logarithmic scaling needs a strictly positive minimum.
    #[error("parameter {id}: logarithmic scale requires min > 0, got {min}")]
    NonPositiveLogMinimum {
        /// Offending parameter.
        id: ParamId,
        /// Declared minimum.
        min: f64,
    },

    /// Discrete bounds must be whole numbers.
    #[error("parameter {id}: discrete bounds must be integral, got [{min}, {max}]")]
    FractionalDiscreteBounds {
        /// Offending parameter.
        id: ParamId,
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },
}

/// Errors while assembling a [`ParamTable`](crate::ParamTable).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A table needs at least one parameter.
    #[error("parameter table is empty")]
    Empty,

    /// Ids must be exactly `0..N-1` in order.
    #[error("parameter ids must be dense: expected id {expected} at position {expected}, found {found}")]
    NonContiguousId {
        /// Id required at this position.
        expected: u32,
        /// Id actually declared.
        found: ParamId,
    },

    /// Two specs share a `string_id`.
    #[error("duplicate string id '{0}'")]
    DuplicateStringId(&'static str),

    /// A spec failed domain validation.
    #[error(transparent)]
    Domain(#[from] DomainViolation),
}

/// Errors when addressing parameters in a table or state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Id is outside `0..count`.
    #[error("parameter id {id} out of range (table has {count} parameters)")]
    OutOfRange {
        /// Requested id.
        id: ParamId,
        /// Number of declared parameters.
        count: usize,
    },

    /// A state or value list does not match the table size.
    #[error("value count mismatch: expected {expected}, got {actual}")]
    CountMismatch {
        /// Number of declared parameters.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}

/// Errors while decoding a persisted state blob.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DecodeError {
    /// Fewer bytes than the fixed layout needs.
    #[error("state blob truncated: need {expected} bytes, got {actual}")]
    Truncated {
        /// `9 + 8 * N`.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// A stored value is not a finite number in \[0.0, 1.0\].
    #[error("state blob value for parameter {id} is not normalized: {value}")]
    ValueOutOfRange {
        /// Parameter whose value is invalid.
        id: ParamId,
        /// Raw decoded value.
        value: f64,
    },
}
