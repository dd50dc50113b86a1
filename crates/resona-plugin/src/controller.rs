//! Editing-side half of the parameter sync.
//!
//! The [`EditController`] owns the authoritative [`ParamState`]. Every
//! change it accepts is applied to that state, mirrored into the
//! host-visible [`NormalizedSink`] and handed to the rendering side through
//! [`ParamShared`]. All methods run on the editing thread and may allocate,
//! log and fail.

use resona_config::{SyncSettings, VersionPolicy};
use resona_core::{NormalizedSink, ParamId, ParamState};

use crate::error::SyncError;
use crate::shared::{OUTPUT, ParamShared};

/// Editing-side parameter owner.
pub struct EditController<S: NormalizedSink> {
    shared: ParamShared,
    state: ParamState,
    sink: S,
    policy: VersionPolicy,
}

impl<S: NormalizedSink> EditController<S> {
    /// Creates a controller holding the table's initial state and pushes
    /// those values into `sink`.
    pub fn new(shared: ParamShared, mut sink: S, settings: &SyncSettings) -> Result<Self, SyncError> {
        let table = shared.table();
        let state = table.initial_state();
        state.apply_to(table, &mut sink)?;
        Ok(Self {
            shared,
            state,
            sink,
            policy: settings.version_policy,
        })
    }

    /// The authoritative state.
    pub fn state(&self) -> &ParamState {
        &self.state
    }

    /// The host-visible sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the host-visible sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Handle shared with the rendering side.
    pub fn shared(&self) -> &ParamShared {
        &self.shared
    }

    /// Scaled value of `id` in the authoritative state.
    pub fn scaled(&self, id: ParamId) -> Result<f64, SyncError> {
        Ok(self.state.scaled(self.shared.table(), id)?)
    }

    /// Applies a host or UI edit in normalized units.
    ///
    /// The value is clamped into \[0.0, 1.0\]; the id is not. The rendering
    /// side ramps toward the new value.
    pub fn set_param_normalized(&mut self, id: ParamId, value: f64) -> Result<(), SyncError> {
        let spec = self.shared.table().get(id)?;
        if spec.is_read_only() {
            return Err(SyncError::ReadOnly(id));
        }
        self.state.set(id, value)?;
        let stored = self.state.get(id)?;
        self.sink.set_normalized(id, stored);
        self.shared.publish_edit(id, stored)?;
        Ok(())
    }

    /// Applies an edit in scaled units, clamped into the parameter's domain.
    pub fn set_param_scaled(&mut self, id: ParamId, value: f64) -> Result<(), SyncError> {
        let spec = self.shared.table().get(id)?;
        let normalized = spec.to_normalized(spec.clamp(value));
        self.set_param_normalized(id, normalized)
    }

    /// Sets the bypass switch on both sides.
    ///
    /// Variants without a bypass parameter stay unbypassed.
    pub fn set_bypass(&mut self, bypassed: bool) {
        let has_bypass = self.shared.table().has_bypass();
        let bypassed = bypassed && has_bypass;
        self.state.set_bypass(bypassed);
        if has_bypass {
            self.sink.set_bypass(bypassed);
        }
        self.shared.set_bypassed(bypassed);
        self.shared.notify_host();
    }

    /// Encodes the current state, stamped with the table's version.
    pub fn save_state(&self) -> Vec<u8> {
        let mut state = self.state.clone();
        state.set_version(self.shared.table().state_version());
        let bytes = state.encode();
        tracing::debug!(bytes = bytes.len(), "state saved");
        bytes
    }

    /// Replaces the whole state.
    ///
    /// The editing side takes the new values unconditionally. If a processor
    /// is active it jumps to them on its next [`pull_edits`] without
    /// ramping. Read-only parameters keep their current value, and the
    /// bypass flag is dropped for variants without a bypass parameter.
    ///
    /// [`pull_edits`]: crate::RenderProcessor::pull_edits
    pub fn load_state(&mut self, state: ParamState) -> Result<(), SyncError> {
        let table = self.shared.table();
        if state.len() != table.len() {
            return Err(resona_core::ParamError::CountMismatch {
                expected: table.len(),
                actual: state.len(),
            }
            .into());
        }

        let mut next = state;
        for spec in table.iter().filter(|spec| spec.is_read_only()) {
            next.set(spec.id, self.state.get(spec.id)?)?;
        }
        next.set_version(table.state_version());
        // A bypass byte means nothing to a variant without the switch.
        next.set_bypass(next.bypass() && table.has_bypass());
        next.apply_to(table, &mut self.sink)?;

        for (spec, &value) in table.iter().zip(next.values()) {
            if !spec.is_read_only() {
                self.shared.publish_snap(spec.id, value)?;
            }
        }
        self.shared.set_bypassed(next.bypass());
        self.state = next;
        self.shared.notify_host();

        tracing::info!(
            params = table.len(),
            bypass = self.state.bypass(),
            active = self.shared.is_active(),
            "state loaded"
        );
        Ok(())
    }

    /// Decodes a persisted blob and loads it.
    ///
    /// Blobs from a newer version are refused under
    /// [`VersionPolicy::RejectFuture`]; under
    /// [`VersionPolicy::AcceptFuture`] the known prefix is read. Nothing is
    /// applied on failure.
    pub fn load_state_bytes(&mut self, bytes: &[u8]) -> Result<(), SyncError> {
        let table = self.shared.table();
        let found = ParamState::peek_version(bytes)?;
        let supported = table.state_version();
        if found > supported {
            match self.policy {
                VersionPolicy::RejectFuture => {
                    tracing::warn!(found, supported, "refusing state from a newer version");
                    return Err(SyncError::FutureVersion { found, supported });
                }
                VersionPolicy::AcceptFuture => {
                    tracing::warn!(found, supported, "loading known prefix of newer state");
                }
            }
        }
        let state = ParamState::decode(bytes, table.len())?;
        self.load_state(state)
    }

    /// Pulls read-only values written by the rendering side.
    ///
    /// Returns how many parameters changed.
    pub fn poll_outputs(&mut self) -> usize {
        let mut updated = 0;
        for (spec, slot) in self.shared.table().iter().zip(self.shared.slots()) {
            if !spec.is_read_only() || slot.take_flags() & OUTPUT == 0 {
                continue;
            }
            let value = slot.load();
            if self.state.set(spec.id, value).is_ok() {
                self.sink.set_normalized(spec.id, value);
                updated += 1;
            }
        }
        updated
    }

    /// Periodic editing-side housekeeping.
    ///
    /// Pulls pending outputs, then handles a deactivation notice by zeroing
    /// every read-only parameter. Returns `true` if a deactivation was
    /// handled.
    pub fn idle(&mut self) -> bool {
        self.poll_outputs();
        if !self.shared.take_deactivation_notice() {
            return false;
        }
        for spec in self.shared.table().iter().filter(|spec| spec.is_read_only()) {
            if self.state.set(spec.id, 0.0).is_ok() {
                self.sink.set_normalized(spec.id, 0.0);
            }
        }
        tracing::debug!("processor deactivated, outputs reset");
        true
    }
}

impl<S: NormalizedSink + std::fmt::Debug> std::fmt::Debug for EditController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditController")
            .field("shared", &self.shared)
            .field("state", &self.state)
            .field("sink", &self.sink)
            .field("policy", &self.policy)
            .finish()
    }
}
