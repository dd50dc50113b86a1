//! Resona Core - parameter state for audio plugins
//!
//! This crate holds the parameter-state subsystem shared by every resona
//! plugin variant. Nothing here performs DSP; it describes parameters,
//! converts their values and carries them between threads and sessions.
//!
//! # Core Abstractions
//!
//! ## Descriptors
//!
//! - [`ParamSpec`] - Immutable id, name and numeric domain of one parameter
//! - [`ParamKind`] - Linear, logarithmic, discrete or string-list mapping
//! - [`ParamTable`] - Validated, dense `0..N-1` table for one plugin variant
//!
//! ## Values
//!
//! - [`transform`] - Normalized / scaled / discrete conversions
//! - [`ParamState`] - Versioned normalized values plus bypass, with a fixed
//!   little-endian binary layout
//! - [`RampedValue`] - Linear per-sample ramp toward a target value
//!
//! # Value Representations
//!
//! | Representation | Range         | Used by                         |
//! |----------------|---------------|---------------------------------|
//! | Normalized     | \[0.0, 1.0\]  | Host automation, persisted state|
//! | Scaled         | `[min, max]`  | DSP code, display               |
//! | Discrete       | `min..=max`   | Stepped parameters              |
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature:
//!
//! ```toml
//! [dependencies]
//! resona-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use resona_core::{ParamId, ParamSpec, ParamState, ParamTable, RampedValue, TableOptions};
//!
//! let table = ParamTable::new(
//!     vec![
//!         ParamSpec::linear(ParamId(0), "Frequency", "Freq", 20.0, 15000.0, 500.0),
//!         ParamSpec::linear(ParamId(1), "Mix", "Mix", 0.0, 1.0, 0.0),
//!     ],
//!     TableOptions::default(),
//! )?;
//!
//! let state = ParamState::from_parts(0, false, vec![0.5, 0.0]);
//! let restored = ParamState::decode(&state.encode(), table.len())?;
//! let freq = restored.scaled(&table, ParamId(0))?;
//! assert_eq!(freq, 7510.0);
//!
//! let mut ramp = RampedValue::new(freq);
//! ramp.set_target(15000.0, 4);
//! let last = (0..4).map(|_| ramp.advance()).last();
//! assert_eq!(last, Some(15000.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: [`RampedValue`] never allocates, locks or fails
//! - **Decode once**: fallible work happens off the audio thread
//! - **Stable layout**: ids are array indices and never change meaning

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod kind;
pub mod ramp;
pub mod spec;
pub mod state;
pub mod table;
pub mod transform;

// Re-export main types at crate root
pub use error::{DecodeError, DomainViolation, ParamError, TableError};
pub use kind::ParamKind;
pub use ramp::{RampedValue, ramp_samples};
pub use spec::{ParamFlags, ParamId, ParamSpec, ParamUnit, ValueDisplay};
pub use state::{NormalizedSink, ParamState};
pub use table::{BYPASS_PARAM_ID, ParamTable, TableOptions};
