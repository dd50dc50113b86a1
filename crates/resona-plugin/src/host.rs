//! In-memory host parameter objects.
//!
//! [`HostParams`] is what a plugin wrapper exposes to the host: one
//! normalized value per parameter, the bypass switch, and text conversion.
//! It implements [`NormalizedSink`] so an
//! [`EditController`](crate::EditController) can drive it directly.

use resona_core::{BYPASS_PARAM_ID, NormalizedSink, ParamFlags, ParamId, ParamSpec, ParamTable};
use std::sync::Arc;

/// Host-visible parameter values.
#[derive(Debug, Clone)]
pub struct HostParams {
    table: Arc<ParamTable>,
    values: Vec<f64>,
    bypass: bool,
    generation: u64,
}

impl HostParams {
    /// Parameter objects at the table's initial values.
    pub fn new(table: Arc<ParamTable>) -> Self {
        let values = table.iter().map(ParamSpec::initial_normalized).collect();
        Self {
            table,
            values,
            bypass: false,
            generation: 0,
        }
    }

    /// The parameter table.
    pub fn table(&self) -> &ParamTable {
        &self.table
    }

    /// Number of parameters exposed to the host, bypass included.
    pub fn count(&self) -> usize {
        self.values.len() + usize::from(self.table.has_bypass())
    }

    /// Normalized value of `id`. The bypass id reads as `0.0` / `1.0`.
    pub fn normalized(&self, id: ParamId) -> Option<f64> {
        if id == BYPASS_PARAM_ID && self.table.has_bypass() {
            return Some(if self.bypass { 1.0 } else { 0.0 });
        }
        self.values.get(id.index()).copied()
    }

    /// Scaled value of `id`.
    pub fn scaled(&self, id: ParamId) -> Option<f64> {
        let spec = self.table.get(id).ok()?;
        self.values.get(id.index()).map(|&n| spec.to_scaled(n))
    }

    /// Whether the host may record automation for `id`. The bypass switch
    /// always can; meters and the resonator's link switches cannot.
    pub fn is_automatable(&self, id: ParamId) -> Option<bool> {
        if id == BYPASS_PARAM_ID && self.table.has_bypass() {
            return Some(true);
        }
        let spec = self.table.get(id).ok()?;
        Some(spec.flags.contains(ParamFlags::AUTOMATABLE))
    }

    /// Bypass switch.
    pub fn bypass(&self) -> bool {
        self.bypass
    }

    /// Bumped on every change; UIs compare it to skip redraws.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Display text for a normalized value of `id`.
    pub fn value_to_text(&self, id: ParamId, normalized: f64) -> Option<String> {
        if id == BYPASS_PARAM_ID && self.table.has_bypass() {
            return Some(if normalized >= 0.5 { "On" } else { "Off" }.to_string());
        }
        let spec = self.table.get(id).ok()?;
        Some(spec.display(spec.to_scaled(normalized)).to_string())
    }

    /// Display text for the current value of `id`.
    pub fn text(&self, id: ParamId) -> Option<String> {
        self.value_to_text(id, self.normalized(id)?)
    }

    /// Parses user text into a normalized value for `id`.
    pub fn text_to_value(&self, id: ParamId, text: &str) -> Option<f64> {
        if id == BYPASS_PARAM_ID && self.table.has_bypass() {
            return match text.trim().to_ascii_lowercase().as_str() {
                "on" | "1" => Some(1.0),
                "off" | "0" => Some(0.0),
                _ => None,
            };
        }
        let spec = self.table.get(id).ok()?;
        spec.parse_value(text).map(|scaled| spec.to_normalized(scaled))
    }
}

impl NormalizedSink for HostParams {
    fn set_normalized(&mut self, id: ParamId, value: f64) {
        if let Some(slot) = self.values.get_mut(id.index()) {
            *slot = value;
            self.generation += 1;
        }
    }

    fn set_bypass(&mut self, bypassed: bool) {
        self.bypass = bypassed;
        self.generation += 1;
    }
}
