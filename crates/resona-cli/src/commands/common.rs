//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use resona_config::{Preset, paths};
use resona_core::{ParamState, ParamTable};
use std::path::{Path, PathBuf};

/// The resonator table.
pub fn table() -> anyhow::Result<ParamTable> {
    resona_plugin::resonator_table().context("resonator table is invalid")
}

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid value for '{key}': {e}"))?;
    Ok((key.trim().to_string(), value))
}

/// Read and decode a state blob for `table`.
///
/// Blobs from a newer version are read up to the known parameters.
pub fn read_state(path: &Path, table: &ParamTable) -> anyhow::Result<ParamState> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let version = ParamState::peek_version(&bytes)
        .with_context(|| format!("{} is not a state blob", path.display()))?;
    if version > table.state_version() {
        tracing::warn!(
            version,
            supported = table.state_version(),
            "blob is from a newer version, reading known parameters only"
        );
    }
    ParamState::decode(&bytes, table.len())
        .with_context(|| format!("failed to decode {}", path.display()))
}

/// Write an encoded state blob.
pub fn write_state(path: &Path, state: &ParamState) -> anyhow::Result<()> {
    std::fs::write(path, state.encode())
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Load a preset by path or by name from the user presets directory.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    let path = PathBuf::from(name);
    if path.exists() {
        return Ok(Preset::load(&path)?);
    }

    if let Some(path) = paths::find_preset(name) {
        return Ok(Preset::load(&path)?);
    }

    anyhow::bail!("Preset '{name}' not found. Use 'resona presets' to see available presets.")
}
