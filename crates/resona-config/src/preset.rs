//! Preset file format and conversion to and from [`ParamState`].

use resona_core::{ParamSpec, ParamState, ParamTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Named parameter snapshot stored as TOML.
///
/// Values are scaled (physical) units keyed by each parameter's
/// `string_id`, so presets stay readable and survive reordering of the
/// table. Parameters missing from a preset take their default value.
///
/// # TOML Format
///
/// ```toml
/// name = "Glass Bells"
/// description = "Bright, long decay"
/// bypass = false
///
/// [params]
/// vol = 0.7
/// mix = 80.0
/// res_dim = 3.0
/// res_freq = 880.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Bypass switch.
    #[serde(default)]
    pub bypass: bool,

    /// Scaled values by string id.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            bypass: false,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set one parameter's scaled value.
    pub fn with_param(mut self, string_id: impl Into<String>, value: f64) -> Self {
        self.params.insert(string_id.into(), value);
        self
    }

    /// Snapshot `state` as a preset.
    ///
    /// Read-only parameters and parameters without a string id are skipped.
    pub fn from_state(name: impl Into<String>, table: &ParamTable, state: &ParamState) -> Self {
        let params = table
            .iter()
            .zip(state.values())
            .filter(|(spec, _)| is_persisted(spec))
            .map(|(spec, &normalized)| {
                let scaled = spec.clamp(spec.to_scaled(normalized));
                (spec.string_id.to_string(), scaled)
            })
            .collect();
        Self {
            name: name.into(),
            description: None,
            bypass: state.bypass(),
            params,
        }
    }

    /// Builds a state for `table` from this preset.
    ///
    /// Fails on names the table does not know, on read-only parameters and
    /// on values outside a parameter's domain. The result carries the table's current version.
    pub fn to_state(&self, table: &ParamTable) -> Result<ParamState, ConfigError> {
        let mut state = table.default_state();
        state.set_bypass(self.bypass);
        for (string_id, &value) in &self.params {
            let spec = table
                .by_string_id(string_id)
                .ok_or_else(|| ConfigError::UnknownParameter(string_id.clone()))?;
            if spec.is_read_only() {
                return Err(ConfigError::ReadOnlyParameter(string_id.clone()));
            }
            if !value.is_finite() || value < spec.min || value > spec.max {
                return Err(ConfigError::InvalidValue {
                    param: string_id.clone(),
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
            state.set(spec.id, spec.to_normalized(value))?;
        }
        tracing::debug!(preset = %self.name, params = self.params.len(), "preset converted to state");
        Ok(state)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!(preset = %self.name, path = %path.display(), "preset saved");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

fn is_persisted(spec: &ParamSpec) -> bool {
    !spec.string_id.is_empty() && !spec.is_read_only()
}
