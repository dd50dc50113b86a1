//! Versioned parameter state and its binary layout.
//!
//! # Layout
//!
//! All fields little-endian, no padding:
//!
//! | Offset | Size    | Field                              |
//! |--------|---------|------------------------------------|
//! | 0      | 8       | version (`u64`)                    |
//! | 8      | 1       | bypass (`0` or `1`)                |
//! | 9      | 8 × N   | normalized values (`f64`, id order)|
//!
//! The version is stored and returned but never changes how a blob is
//! read. Bytes past `9 + 8N` are ignored.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::error::{DecodeError, ParamError};
use crate::spec::ParamId;
use crate::table::ParamTable;

const HEADER_LEN: usize = 9;
const VALUE_LEN: usize = 8;

/// Receiver of normalized values, e.g. the host-visible parameter objects.
pub trait NormalizedSink {
    /// Sets one parameter's normalized value.
    fn set_normalized(&mut self, id: ParamId, value: f64);

    /// Sets the bypass switch. Variants without bypass ignore it.
    fn set_bypass(&mut self, _bypassed: bool) {}
}

/// Normalized value of every declared parameter plus bypass and version.
///
/// The value count is fixed by the [`ParamTable`] the state belongs to and
/// every value lies in \[0.0, 1.0\].
#[derive(Debug, Clone, PartialEq)]
pub struct ParamState {
    version: u64,
    bypass: bool,
    values: Vec<f64>,
}

impl ParamState {
    /// State with `count` zeroed values.
    pub fn new(version: u64, count: usize) -> Self {
        Self {
            version,
            bypass: false,
            values: vec![0.0; count],
        }
    }

    /// Builds a state from raw parts, clamping values into \[0.0, 1.0\].
    pub fn from_parts(version: u64, bypass: bool, mut values: Vec<f64>) -> Self {
        for value in &mut values {
            *value = clamp_unit(*value);
        }
        Self {
            version,
            bypass,
            values,
        }
    }

    /// Format version.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the format version.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Bypass flag.
    #[inline]
    pub fn bypass(&self) -> bool {
        self.bypass
    }

    /// Sets the bypass flag.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    /// Number of values (`N`).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the state holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalized values in id order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Normalized value for `id`.
    pub fn get(&self, id: ParamId) -> Result<f64, ParamError> {
        self.values
            .get(id.index())
            .copied()
            .ok_or(self.out_of_range(id))
    }

    /// Stores a normalized value, clamped into \[0.0, 1.0\]. NaN stores `0.0`.
    pub fn set(&mut self, id: ParamId, value: f64) -> Result<(), ParamError> {
        let err = self.out_of_range(id);
        let slot = self.values.get_mut(id.index()).ok_or(err)?;
        *slot = clamp_unit(value);
        Ok(())
    }

    /// Scaled value for `id`, converted through the table's spec.
    pub fn scaled(&self, table: &ParamTable, id: ParamId) -> Result<f64, ParamError> {
        let spec = table.get(id)?;
        Ok(spec.to_scaled(self.get(id)?))
    }

    /// Encoded size for `count` parameters: `9 + 8 * count`.
    #[inline]
    pub const fn encoded_len(count: usize) -> usize {
        HEADER_LEN + VALUE_LEN * count
    }

    /// Serializes into the fixed little-endian layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::encoded_len(self.values.len()));
        self.encode_into(&mut out);
        out
    }

    /// Appends the encoded state to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.version.to_le_bytes());
        out.push(u8::from(self.bypass));
        for value in &self.values {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }

    /// Reads the version field without decoding the rest.
    pub fn peek_version(bytes: &[u8]) -> Result<u64, DecodeError> {
        let header: [u8; 8] = bytes
            .get(..8)
            .and_then(|b| b.try_into().ok())
            .ok_or(DecodeError::Truncated {
                expected: HEADER_LEN,
                actual: bytes.len(),
            })?;
        Ok(u64::from_le_bytes(header))
    }

    /// Decodes a blob holding `count` values.
    ///
    /// Fails with [`DecodeError::Truncated`] when fewer than
    /// `9 + 8 * count` bytes are available and with
    /// [`DecodeError::ValueOutOfRange`] for values that are not finite or
    /// not in \[0.0, 1.0\]. Nothing is returned on failure.
    pub fn decode(bytes: &[u8], count: usize) -> Result<Self, DecodeError> {
        let expected = Self::encoded_len(count);
        if bytes.len() < expected {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "param_state: truncated blob ({} of {expected} bytes)",
                bytes.len()
            );
            return Err(DecodeError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let version = Self::peek_version(bytes)?;
        let bypass = bytes[8] != 0;
        let mut values = Vec::with_capacity(count);
        for (index, chunk) in bytes[HEADER_LEN..expected]
            .chunks_exact(VALUE_LEN)
            .enumerate()
        {
            let mut raw = [0u8; VALUE_LEN];
            raw.copy_from_slice(chunk);
            let value = f64::from_le_bytes(raw);
            if !(0.0..=1.0).contains(&value) {
                return Err(DecodeError::ValueOutOfRange {
                    id: ParamId(index as u32),
                    value,
                });
            }
            values.push(value);
        }

        Ok(Self {
            version,
            bypass,
            values,
        })
    }

    /// Pushes every value by id into `sink`, then the bypass flag if the
    /// table's variant implements bypass.
    pub fn apply_to<S: NormalizedSink + ?Sized>(
        &self,
        table: &ParamTable,
        sink: &mut S,
    ) -> Result<(), ParamError> {
        if self.values.len() != table.len() {
            return Err(ParamError::CountMismatch {
                expected: table.len(),
                actual: self.values.len(),
            });
        }
        for (spec, &value) in table.iter().zip(&self.values) {
            sink.set_normalized(spec.id, value);
        }
        if table.has_bypass() {
            sink.set_bypass(self.bypass);
        }
        Ok(())
    }

    fn out_of_range(&self, id: ParamId) -> ParamError {
        ParamError::OutOfRange {
            id,
            count: self.values.len(),
        }
    }
}

#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ParamSpec;
    use crate::table::TableOptions;

    struct Recorder {
        values: Vec<(ParamId, f64)>,
        bypass: Option<bool>,
    }

    impl NormalizedSink for Recorder {
        fn set_normalized(&mut self, id: ParamId, value: f64) {
            self.values.push((id, value));
        }

        fn set_bypass(&mut self, bypassed: bool) {
            self.bypass = Some(bypassed);
        }
    }

    fn table(has_bypass: bool) -> ParamTable {
        ParamTable::new(
            vec![
                ParamSpec::linear(ParamId(0), "Frequency", "Freq", 20.0, 15000.0, 500.0),
                ParamSpec::linear(ParamId(1), "Mix", "Mix", 0.0, 1.0, 1.0),
            ],
            TableOptions {
                state_version: 0,
                has_bypass,
            },
        )
        .unwrap()
    }

    #[test]
    fn encode_layout_is_little_endian() {
        let state = ParamState::from_parts(0x0102, true, vec![0.5, 0.0]);
        let bytes = state.encode();
        assert_eq!(bytes.len(), 25);
        assert_eq!(&bytes[..8], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes[8], 1);
        assert_eq!(&bytes[9..17], &0.5f64.to_le_bytes());
        assert_eq!(&bytes[17..25], &0.0f64.to_le_bytes());
    }

    #[test]
    fn decode_restores_encoded_state() {
        let state = ParamState::from_parts(7, false, vec![0.25, 1.0]);
        assert_eq!(ParamState::decode(&state.encode(), 2).unwrap(), state);
    }

    #[test]
    fn decode_truncated() {
        let bytes = ParamState::from_parts(0, false, vec![0.5, 0.0]).encode();
        assert_eq!(
            ParamState::decode(&bytes[..24], 2),
            Err(DecodeError::Truncated {
                expected: 25,
                actual: 24
            })
        );
        assert_eq!(
            ParamState::decode(&[], 0),
            Err(DecodeError::Truncated {
                expected: 9,
                actual: 0
            })
        );
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut bytes = ParamState::from_parts(0, false, vec![0.5]).encode();
        bytes.extend_from_slice(&[0xAA; 16]);
        let state = ParamState::decode(&bytes, 1).unwrap();
        assert_eq!(state.values(), &[0.5]);
    }

    #[test]
    fn decode_rejects_unnormalized_values() {
        let mut bytes = ParamState::new(0, 2).encode();
        bytes[17..25].copy_from_slice(&1.5f64.to_le_bytes());
        assert_eq!(
            ParamState::decode(&bytes, 2),
            Err(DecodeError::ValueOutOfRange {
                id: ParamId(1),
                value: 1.5
            })
        );

        bytes[17..25].copy_from_slice(&f64::NAN.to_le_bytes());
        assert!(matches!(
            ParamState::decode(&bytes, 2),
            Err(DecodeError::ValueOutOfRange { id: ParamId(1), .. })
        ));
    }

    #[test]
    fn nonzero_bypass_byte_is_true() {
        let mut bytes = ParamState::new(0, 1).encode();
        bytes[8] = 0x7F;
        assert!(ParamState::decode(&bytes, 1).unwrap().bypass());
    }

    #[test]
    fn set_clamps_and_bounds_checks() {
        let mut state = ParamState::new(0, 2);
        state.set(ParamId(0), 1.7).unwrap();
        assert_eq!(state.get(ParamId(0)), Ok(1.0));
        state.set(ParamId(1), f64::NAN).unwrap();
        assert_eq!(state.get(ParamId(1)), Ok(0.0));
        assert_eq!(
            state.set(ParamId(2), 0.5),
            Err(ParamError::OutOfRange {
                id: ParamId(2),
                count: 2
            })
        );
    }

    #[test]
    fn apply_to_pushes_values_and_bypass() {
        let state = ParamState::from_parts(0, true, vec![0.5, 0.0]);
        let mut sink = Recorder {
            values: Vec::new(),
            bypass: None,
        };
        state.apply_to(&table(true), &mut sink).unwrap();
        assert_eq!(sink.values, vec![(ParamId(0), 0.5), (ParamId(1), 0.0)]);
        assert_eq!(sink.bypass, Some(true));
    }

    #[test]
    fn apply_to_skips_bypass_without_support() {
        let state = ParamState::from_parts(0, true, vec![0.5, 0.0]);
        let mut sink = Recorder {
            values: Vec::new(),
            bypass: None,
        };
        state.apply_to(&table(false), &mut sink).unwrap();
        assert_eq!(sink.bypass, None);
    }

    #[test]
    fn apply_to_rejects_count_mismatch() {
        let state = ParamState::new(0, 3);
        let mut sink = Recorder {
            values: Vec::new(),
            bypass: None,
        };
        assert_eq!(
            state.apply_to(&table(true), &mut sink),
            Err(ParamError::CountMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert!(sink.values.is_empty());
    }

    #[test]
    fn scaled_lookup() {
        let state = ParamState::from_parts(0, false, vec![0.5, 0.0]);
        assert_eq!(state.scaled(&table(true), ParamId(0)), Ok(7510.0));
    }

    #[test]
    fn peek_version_reads_header() {
        let bytes = ParamState::new(42, 5).encode();
        assert_eq!(ParamState::peek_version(&bytes), Ok(42));
        assert!(ParamState::peek_version(&bytes[..4]).is_err());
    }
}
