//! Collaborator seams: where parameter values go, and the audio config.
//!
//! [`NormalizedSink`] (from `resona-core`) receives host-facing normalized
//! values on the editing side. [`ScaledSink`] receives scaled values on the
//! rendering side and drives the DSP.

use resona_core::ParamId;

pub use resona_core::NormalizedSink;

/// Receiver of scaled (physical) values on the rendering side.
///
/// Implementations run on the audio thread and must not allocate, lock or
/// block.
pub trait ScaledSink {
    /// Sets one parameter's scaled value.
    fn set_scaled(&mut self, id: ParamId, value: f64);
}

impl ScaledSink for [f64] {
    #[inline]
    fn set_scaled(&mut self, id: ParamId, value: f64) {
        if let Some(slot) = self.get_mut(id.index()) {
            *slot = value;
        }
    }
}

impl ScaledSink for Vec<f64> {
    #[inline]
    fn set_scaled(&mut self, id: ParamId, value: f64) {
        self.as_mut_slice().set_scaled(id, value);
    }
}

/// Audio configuration handed over at activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioConfig {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block the host will process.
    pub max_block_size: u32,
}

impl AudioConfig {
    /// Config for `sample_rate` with a 1024-sample maximum block.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            max_block_size: 1024,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
