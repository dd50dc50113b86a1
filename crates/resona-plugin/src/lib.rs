//! Editing/rendering parameter sync for resona plugins.
//!
//! A plugin instance runs on two sides. The editing side (host main thread,
//! GUI) owns the authoritative state, persists it and talks to the host.
//! The rendering side (audio thread) keeps a smoothed mirror of the same
//! values and feeds them to the DSP without locking or allocating.
//!
//! # Architecture
//!
//! | Type | Side | Role |
//! |------|------|------|
//! | [`EditController`] | editing | authoritative [`ParamState`](resona_core::ParamState), save/load, host sink |
//! | [`RenderProcessor`] | rendering | one [`RampedValue`](resona_core::RampedValue) per parameter |
//! | [`ParamShared`] | both | atomic hand-off slots, bypass, activation |
//! | [`HostParams`] | editing | host-visible normalized values and text |
//!
//! Edits travel editing -> rendering and are ramped over the configured
//! smoothing time. State loads travel the same way but jump. Read-only
//! meters travel rendering -> editing and are picked up in
//! [`EditController::idle`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use resona_config::SyncSettings;
//! use resona_plugin::{
//!     AudioConfig, EditController, HostParams, PARAM_COUNT, ParamShared, RenderProcessor, ids,
//!     resonator_table,
//! };
//!
//! let table = Arc::new(resonator_table().unwrap());
//! let settings = SyncSettings::default();
//! let shared = ParamShared::new(Arc::clone(&table), None);
//! let mut controller =
//!     EditController::new(shared.clone(), HostParams::new(table), &settings).unwrap();
//!
//! let mut processor =
//!     RenderProcessor::activate(shared, AudioConfig::new(48000.0), &settings).unwrap();
//!
//! controller.set_param_scaled(ids::RESONATOR_FREQ, 1000.0).unwrap();
//! processor.pull_edits();
//!
//! // One maximum-size block (1024 frames) covers the 960-step ramp.
//! let mut dsp = vec![0.0; PARAM_COUNT];
//! processor.advance_block(48_000, &mut dsp);
//! assert!((dsp[ids::RESONATOR_FREQ.index()] - 1000.0).abs() < 1e-6);
//! ```

pub mod controller;
pub mod error;
pub mod host;
pub mod processor;
pub mod resonator;
pub mod shared;
pub mod sink;

pub use controller::EditController;
pub use error::SyncError;
pub use host::HostParams;
pub use processor::RenderProcessor;
pub use resonator::{
    MAX_DIMENSION, MAX_ORDER, PARAM_COUNT, STATE_VERSION, ids, resonator_specs, resonator_table,
};
pub use shared::{EditSlot, ParamShared};
pub use sink::{AudioConfig, NormalizedSink, ScaledSink};
