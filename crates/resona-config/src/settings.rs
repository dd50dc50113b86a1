//! Parameter sync settings.
//!
//! [`SyncSettings`] controls how the rendering side ramps edits and how the
//! editing side treats state blobs written by newer plugin versions. Settings
//! are plain TOML; every field is optional.
//!
//! ```toml
//! smoothing_ms = 20.0
//! version_policy = "reject_future"
//!
//! [ramp_resolution]
//! mode = "per_block"
//! block_size = 64
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::paths;

/// File name of the user settings file inside [`paths::user_config_dir`].
pub const SETTINGS_FILE: &str = "settings.toml";

/// How often ramps advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RampResolution {
    /// One ramp step per sample.
    #[default]
    PerSample,
    /// One ramp step per block of `block_size` samples.
    PerBlock {
        /// Samples per block.
        block_size: u32,
    },
}

/// What to do with a state blob whose version is newer than the table's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionPolicy {
    /// Refuse to load it.
    #[default]
    RejectFuture,
    /// Load the parameters this version knows and ignore the rest.
    AcceptFuture,
}

/// Settings for the editing/rendering sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Ramp duration in milliseconds. `0` makes every edit a jump.
    pub smoothing_ms: f64,
    /// Per-sample or per-block ramp stepping.
    pub ramp_resolution: RampResolution,
    /// Handling of future state versions.
    pub version_policy: VersionPolicy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            smoothing_ms: 20.0,
            ramp_resolution: RampResolution::PerSample,
            version_policy: VersionPolicy::RejectFuture,
        }
    }
}

impl SyncSettings {
    /// Sets the smoothing time.
    pub fn with_smoothing_ms(mut self, smoothing_ms: f64) -> Self {
        self.smoothing_ms = smoothing_ms;
        self
    }

    /// Sets the ramp resolution.
    pub fn with_ramp_resolution(mut self, resolution: RampResolution) -> Self {
        self.ramp_resolution = resolution;
        self
    }

    /// Sets the version policy.
    pub fn with_version_policy(mut self, policy: VersionPolicy) -> Self {
        self.version_policy = policy;
        self
    }

    /// Ramp length in steps at `sample_rate`.
    ///
    /// In per-block mode the sample count is divided by the block size, with
    /// a floor of one step whenever smoothing is enabled.
    pub fn ramp_steps(&self, sample_rate: f64) -> u32 {
        let samples = resona_core::ramp_samples(self.smoothing_ms, sample_rate);
        match self.ramp_resolution {
            RampResolution::PerSample => samples,
            RampResolution::PerBlock { .. } if samples == 0 => 0,
            RampResolution::PerBlock { block_size } => (samples / block_size.max(1)).max(1),
        }
    }

    /// Checks field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.smoothing_ms.is_finite() || self.smoothing_ms < 0.0 {
            return Err(ConfigError::InvalidSetting {
                field: "smoothing_ms",
                reason: format!("must be finite and >= 0, got {}", self.smoothing_ms),
            });
        }
        if let RampResolution::PerBlock { block_size: 0 } = self.ramp_resolution {
            return Err(ConfigError::InvalidSetting {
                field: "ramp_resolution.block_size",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads and validates settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded sync settings");
        Ok(settings)
    }

    /// Loads the user settings file, or defaults if there is none.
    pub fn load_user() -> Result<Self, ConfigError> {
        let path = paths::user_config_dir().join(SETTINGS_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Writes settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }
}
