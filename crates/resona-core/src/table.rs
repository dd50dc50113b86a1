//! The id-indexed table of parameter specs for one plugin variant.
//!
//! A [`ParamTable`] is built once at startup, validated, and then shared by
//! reference (typically behind an `Arc`) between the editing side and the
//! rendering side. It is never mutated after construction.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::{ParamError, TableError};
use crate::spec::{ParamId, ParamSpec};
use crate::state::ParamState;

/// Host parameter id used for the bypass switch.
///
/// Bypass is not part of the dense `0..N-1` id space; it is carried in its
/// own field of [`ParamState`].
pub const BYPASS_PARAM_ID: ParamId = ParamId(1_000_001);

/// Per-variant table options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOptions {
    /// Format tag written into every encoded state.
    pub state_version: u64,
    /// Whether the variant exposes a bypass parameter to the host.
    pub has_bypass: bool,
}

/// Validated, immutable collection of [`ParamSpec`]s with ids `0..N-1`.
#[derive(Debug, Clone)]
pub struct ParamTable {
    specs: Vec<ParamSpec>,
    options: TableOptions,
}

impl ParamTable {
    /// Builds a table, validating every spec.
    ///
    /// Fails if the list is empty, if any spec's domain is invalid, if the
    /// ids are not exactly `0, 1, 2, ...` in order, or if two specs share a
    /// non-empty `string_id`.
    pub fn new(specs: Vec<ParamSpec>, options: TableOptions) -> Result<Self, TableError> {
        if specs.is_empty() {
            return Err(TableError::Empty);
        }
        for (position, spec) in specs.iter().enumerate() {
            let expected = position as u32;
            if spec.id.0 != expected {
                return Err(TableError::NonContiguousId {
                    expected,
                    found: spec.id,
                });
            }
            spec.validate()?;
            if !spec.string_id.is_empty()
                && specs[..position]
                    .iter()
                    .any(|other| other.string_id == spec.string_id)
            {
                return Err(TableError::DuplicateStringId(spec.string_id));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "param_table: {} parameters, state version {}, bypass {}",
            specs.len(),
            options.state_version,
            options.has_bypass
        );

        Ok(Self { specs, options })
    }

    /// Number of declared parameters (`N`).
    #[inline]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always `false`; a table holds at least one spec.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Current state format version.
    #[inline]
    pub fn state_version(&self) -> u64 {
        self.options.state_version
    }

    /// Whether the variant implements bypass.
    #[inline]
    pub fn has_bypass(&self) -> bool {
        self.options.has_bypass
    }

    /// Table options as declared.
    pub fn options(&self) -> TableOptions {
        self.options
    }

    /// Looks up a spec by id.
    ///
    /// Out-of-range ids are a bounds error, never clamped.
    pub fn get(&self, id: ParamId) -> Result<&ParamSpec, ParamError> {
        self.specs.get(id.index()).ok_or(ParamError::OutOfRange {
            id,
            count: self.specs.len(),
        })
    }

    /// Looks up a spec by its `string_id`.
    pub fn by_string_id(&self, string_id: &str) -> Option<&ParamSpec> {
        if string_id.is_empty() {
            return None;
        }
        self.specs.iter().find(|spec| spec.string_id == string_id)
    }

    /// Iterates specs in id order.
    pub fn iter(&self) -> core::slice::Iter<'_, ParamSpec> {
        self.specs.iter()
    }

    /// All specs as a slice, indexed by id.
    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    /// State a fresh instance starts from: normalized initial values,
    /// current version, bypass off.
    pub fn initial_state(&self) -> ParamState {
        ParamState::from_parts(
            self.options.state_version,
            false,
            self.specs.iter().map(ParamSpec::initial_normalized).collect(),
        )
    }

    /// State holding every parameter's default value.
    pub fn default_state(&self) -> ParamState {
        ParamState::from_parts(
            self.options.state_version,
            false,
            self.specs.iter().map(ParamSpec::default_normalized).collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ParamTable {
    type Item = &'a ParamSpec;
    type IntoIter = core::slice::Iter<'a, ParamSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
