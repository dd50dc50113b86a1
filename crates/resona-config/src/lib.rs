//! Settings and preset management for resona plugins.
//!
//! # Features
//!
//! - **Sync settings**: smoothing time, ramp resolution and state version
//!   policy, loaded from TOML
//! - **Presets**: named parameter snapshots in TOML, converted to and from
//!   [`resona_core::ParamState`]
//! - **Paths**: platform-specific config and preset directories
//!
//! # Example
//!
//! ```rust,no_run
//! use resona_config::{Preset, SyncSettings, user_presets_dir};
//!
//! let settings = SyncSettings::load_user().unwrap();
//! println!("ramp: {} ms", settings.smoothing_ms);
//!
//! let preset = Preset::new("Glass Bells")
//!     .with_description("Bright, long decay")
//!     .with_param("mix", 80.0)
//!     .with_param("res_freq", 880.0);
//! preset.save(user_presets_dir().join("glass_bells.toml")).unwrap();
//! ```

mod error;
mod preset;
mod settings;

/// Platform-specific paths for settings and presets.
pub mod paths;

pub use error::ConfigError;
pub use paths::{user_config_dir, user_presets_dir};
pub use preset::Preset;
pub use settings::{RampResolution, SETTINGS_FILE, SyncSettings, VersionPolicy};
