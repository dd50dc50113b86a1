//! Rendering-side half of the parameter sync.
//!
//! A [`RenderProcessor`] exists only while the plugin is active. It owns one
//! [`RampedValue`] per parameter, built from the latest shared values at
//! activation. Everything after [`RenderProcessor::activate`] is
//! allocation-free, lock-free and infallible, and nothing on that path logs.

use resona_config::{RampResolution, SyncSettings};
use resona_core::{ParamId, RampedValue};

use crate::error::SyncError;
use crate::shared::{ParamShared, SNAP};
use crate::sink::{AudioConfig, ScaledSink};

/// Real-time parameter mirror.
///
/// Created by [`activate`](Self::activate), released by
/// [`deactivate`](Self::deactivate) or on drop. Either way the editing side
/// gets a deactivation notice.
pub struct RenderProcessor {
    shared: ParamShared,
    ramps: Vec<RampedValue>,
    ramp_steps: u32,
    resolution: RampResolution,
    sample_rate: f64,
    max_block_size: u32,
}

impl RenderProcessor {
    /// Activates the rendering side.
    ///
    /// Builds the mirror from the latest shared values and derives the ramp
    /// length from `config.sample_rate`. Fails with
    /// [`SyncError::AlreadyActive`] if another processor is live on the same
    /// shared state.
    pub fn activate(
        shared: ParamShared,
        config: AudioConfig,
        settings: &SyncSettings,
    ) -> Result<Self, SyncError> {
        if !shared.try_activate() {
            tracing::warn!("activate called on an active instance");
            return Err(SyncError::AlreadyActive);
        }

        // A stale notice from an earlier deactivation would reset the
        // freshly activated outputs.
        shared.take_deactivation_notice();

        let ramps = shared
            .table()
            .iter()
            .zip(shared.slots())
            .map(|(spec, slot)| {
                if !spec.is_read_only() {
                    slot.take_flags();
                }
                RampedValue::new(spec.to_scaled(slot.load()))
            })
            .collect();
        let ramp_steps = settings.ramp_steps(config.sample_rate);

        tracing::info!(
            sample_rate = config.sample_rate,
            ramp_steps,
            max_block_size = config.max_block_size,
            params = shared.param_count(),
            "processor activated"
        );

        Ok(Self {
            shared,
            ramps,
            ramp_steps,
            resolution: settings.ramp_resolution,
            sample_rate: config.sample_rate,
            max_block_size: config.max_block_size,
        })
    }

    /// Drains pending editing-side changes.
    ///
    /// Snapped changes (state loads) and stepped parameter kinds jump;
    /// ordinary edits start a ramp. Returns how many parameters changed.
    pub fn pull_edits(&mut self) -> usize {
        let mut changed = 0;
        let table = self.shared.table();
        for ((spec, slot), ramp) in table
            .iter()
            .zip(self.shared.slots())
            .zip(self.ramps.iter_mut())
        {
            if spec.is_read_only() {
                continue;
            }
            let Some((flags, normalized)) = slot.take() else {
                continue;
            };
            let target = spec.to_scaled(normalized);
            if flags & SNAP != 0 || spec.kind.is_stepped() {
                ramp.snap(target);
            } else {
                ramp.set_target(target, self.ramp_steps);
            }
            changed += 1;
        }
        changed
    }

    /// Pushes every controllable parameter's current value into `sink`.
    pub fn prime<S: ScaledSink + ?Sized>(&self, sink: &mut S) {
        for (spec, ramp) in self.shared.table().iter().zip(&self.ramps) {
            if !spec.is_read_only() {
                sink.set_scaled(spec.id, ramp.current());
            }
        }
    }

    /// Advances every running ramp by one step and pushes the new values.
    ///
    /// Call once per sample in per-sample mode, once per block in per-block
    /// mode. Settled parameters are not pushed.
    #[inline]
    pub fn next_frame<S: ScaledSink + ?Sized>(&mut self, sink: &mut S) {
        self.step(1, sink);
    }

    /// Advances ramps across a block of `frames` samples and pushes the
    /// values reached at its end.
    ///
    /// In per-sample mode the ramps move `frames` steps, at most the
    /// `max_block_size` given at activation; in per-block mode they move one
    /// step.
    pub fn advance_block<S: ScaledSink + ?Sized>(&mut self, frames: u32, sink: &mut S) {
        let steps = match self.resolution {
            RampResolution::PerSample => frames.min(self.max_block_size),
            RampResolution::PerBlock { .. } => 1,
        };
        self.step(steps, sink);
    }

    #[inline]
    fn step<S: ScaledSink + ?Sized>(&mut self, steps: u32, sink: &mut S) {
        for (index, ramp) in self.ramps.iter_mut().enumerate() {
            if !ramp.is_settled() {
                let value = ramp.advance_by(steps);
                sink.set_scaled(ParamId(index as u32), value);
            }
        }
    }

    /// Current scaled value of `id`.
    #[inline]
    pub fn value(&self, id: ParamId) -> Option<f64> {
        self.ramps.get(id.index()).map(RampedValue::current)
    }

    /// Ramp state of `id`.
    pub fn ramp(&self, id: ParamId) -> Option<&RampedValue> {
        self.ramps.get(id.index())
    }

    /// Whether every ramp has settled.
    pub fn is_settled(&self) -> bool {
        self.ramps.iter().all(RampedValue::is_settled)
    }

    /// Bypass switch as last set by the editing side.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.shared.is_bypassed()
    }

    /// Reports a metering value (scaled) to the editing side.
    ///
    /// Only read-only parameters accept outputs; returns `false` otherwise.
    pub fn report_output(&mut self, id: ParamId, scaled: f64) -> bool {
        let Some(spec) = self.shared.table().specs().get(id.index()) else {
            return false;
        };
        if !spec.is_read_only() {
            return false;
        }
        let scaled = spec.clamp(scaled);
        let normalized = spec.to_normalized(scaled);
        if let Some(ramp) = self.ramps.get_mut(id.index()) {
            ramp.snap(scaled);
        }
        self.shared.publish_output(id, normalized)
    }

    /// Ramp length in steps.
    pub fn ramp_steps(&self) -> u32 {
        self.ramp_steps
    }

    /// Sample rate given at activation.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Largest block `advance_block` processes.
    pub fn max_block_size(&self) -> u32 {
        self.max_block_size
    }

    /// Handle shared with the editing side.
    pub fn shared(&self) -> &ParamShared {
        &self.shared
    }

    /// Releases the mirror and notifies the editing side.
    pub fn deactivate(self) {
        drop(self);
    }
}

impl Drop for RenderProcessor {
    fn drop(&mut self) {
        self.shared.release();
        tracing::info!("processor deactivated");
    }
}

impl std::fmt::Debug for RenderProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderProcessor")
            .field("params", &self.ramps.len())
            .field("ramp_steps", &self.ramp_steps)
            .field("resolution", &self.resolution)
            .field("sample_rate", &self.sample_rate)
            .field("max_block_size", &self.max_block_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resona_core::{ParamSpec, ParamTable, TableOptions};
    use std::sync::Arc;

    const MODES: &[&str] = &["Modal", "Waveguide"];

    fn shared() -> ParamShared {
        let table = ParamTable::new(
            vec![
                ParamSpec::linear(ParamId(0), "Frequency", "Freq", 20.0, 15000.0, 500.0)
                    .with_initial(7510.0),
                ParamSpec::discrete(ParamId(1), "Order", "Order", 1, 200, 5),
                ParamSpec::string_list(ParamId(2), "Type", "Type", MODES, 0),
                ParamSpec::linear(ParamId(3), "Level", "Level", 0.0, 1.0, 0.0).read_only(),
            ],
            TableOptions::default(),
        )
        .unwrap();
        ParamShared::new(Arc::new(table), None)
    }

    fn settings(smoothing_ms: f64) -> SyncSettings {
        SyncSettings::default().with_smoothing_ms(smoothing_ms)
    }

    #[test]
    fn activate_builds_mirror_from_shared() {
        let proc = RenderProcessor::activate(shared(), AudioConfig::new(48000.0), &settings(20.0))
            .unwrap();
        assert_eq!(proc.value(ParamId(0)), Some(7510.0));
        assert_eq!(proc.value(ParamId(1)), Some(5.0));
        assert_eq!(proc.ramp_steps(), 960);
        assert!(proc.is_settled());
    }

    #[test]
    fn double_activation_fails() {
        let shared = shared();
        let first =
            RenderProcessor::activate(shared.clone(), AudioConfig::default(), &settings(20.0))
                .unwrap();
        let second =
            RenderProcessor::activate(shared.clone(), AudioConfig::default(), &settings(20.0));
        assert!(matches!(second, Err(SyncError::AlreadyActive)));

        first.deactivate();
        assert!(!shared.is_active());
        assert!(RenderProcessor::activate(shared, AudioConfig::default(), &settings(20.0)).is_ok());
    }

    #[test]
    fn edit_ramps_and_snap_jumps() {
        let shared = shared();
        // 4 samples at 1 kHz = 4 ms
        let mut proc =
            RenderProcessor::activate(shared.clone(), AudioConfig::new(1000.0), &settings(4.0))
                .unwrap();

        shared.publish_edit(ParamId(0), 1.0).unwrap();
        assert_eq!(proc.pull_edits(), 1);
        assert_eq!(proc.ramp(ParamId(0)).unwrap().remaining(), 4);

        shared.publish_snap(ParamId(0), 0.0).unwrap();
        proc.pull_edits();
        assert_eq!(proc.value(ParamId(0)), Some(20.0));
        assert!(proc.is_settled());
    }

    #[test]
    fn load_over_pending_edit_jumps() {
        let shared = shared();
        let mut proc =
            RenderProcessor::activate(shared.clone(), AudioConfig::new(1000.0), &settings(4.0))
                .unwrap();

        shared.publish_edit(ParamId(0), 1.0).unwrap();
        shared.publish_snap(ParamId(0), 0.0).unwrap();
        assert_eq!(proc.pull_edits(), 1);
        assert_eq!(proc.value(ParamId(0)), Some(20.0));
        assert!(proc.is_settled());
        assert_eq!(proc.pull_edits(), 0);
    }

    #[test]
    fn stepped_kinds_always_snap() {
        let shared = shared();
        let mut proc =
            RenderProcessor::activate(shared.clone(), AudioConfig::default(), &settings(20.0))
                .unwrap();
        shared.publish_edit(ParamId(1), 1.0).unwrap();
        shared.publish_edit(ParamId(2), 1.0).unwrap();
        assert_eq!(proc.pull_edits(), 2);
        assert_eq!(proc.value(ParamId(1)), Some(200.0));
        assert_eq!(proc.value(ParamId(2)), Some(1.0));
        assert!(proc.is_settled());
    }

    #[test]
    fn next_frame_pushes_only_moving_params() {
        let shared = shared();
        let mut proc =
            RenderProcessor::activate(shared.clone(), AudioConfig::new(1000.0), &settings(2.0))
                .unwrap();
        shared.publish_edit(ParamId(0), 1.0).unwrap();
        proc.pull_edits();

        let mut pushed = Vec::new();
        let mut sink = |id: ParamId, v: f64| pushed.push((id, v));
        proc.next_frame(&mut FnSink(&mut sink));
        proc.next_frame(&mut FnSink(&mut sink));
        proc.next_frame(&mut FnSink(&mut sink));
        assert_eq!(pushed, vec![(ParamId(0), 7510.0 + 7490.0 / 2.0), (ParamId(0), 15000.0)]);
    }

    #[test]
    fn advance_block_per_block_moves_one_step() {
        let shared = shared();
        let settings = settings(4.0).with_ramp_resolution(RampResolution::PerBlock { block_size: 2 });
        let mut proc =
            RenderProcessor::activate(shared.clone(), AudioConfig::new(1000.0), &settings).unwrap();
        assert_eq!(proc.ramp_steps(), 2);

        shared.publish_edit(ParamId(0), 1.0).unwrap();
        proc.pull_edits();
        let mut values = vec![0.0; 4];
        proc.advance_block(2, &mut values);
        assert_eq!(values[0], 7510.0 + 7490.0 / 2.0);
        proc.advance_block(2, &mut values);
        assert_eq!(values[0], 15000.0);
    }

    #[test]
    fn advance_block_per_sample_moves_frames() {
        let shared = shared();
        let mut proc =
            RenderProcessor::activate(shared.clone(), AudioConfig::new(1000.0), &settings(4.0))
                .unwrap();
        shared.publish_edit(ParamId(0), 1.0).unwrap();
        proc.pull_edits();
        let mut values = vec![0.0; 4];
        proc.advance_block(64, &mut values);
        assert_eq!(values[0], 15000.0);
        assert!(proc.is_settled());
    }

    #[test]
    fn advance_block_bounded_by_max_block_size() {
        let shared = shared();
        let config = AudioConfig {
            sample_rate: 1000.0,
            max_block_size: 2,
        };
        let mut proc = RenderProcessor::activate(shared.clone(), config, &settings(4.0)).unwrap();
        assert_eq!(proc.max_block_size(), 2);

        shared.publish_edit(ParamId(0), 1.0).unwrap();
        proc.pull_edits();
        let mut values = vec![0.0; 4];
        proc.advance_block(64, &mut values);
        assert_eq!(values[0], 11255.0);
        assert_eq!(proc.ramp(ParamId(0)).unwrap().remaining(), 2);
    }

    #[test]
    fn prime_skips_read_only() {
        let proc = RenderProcessor::activate(shared(), AudioConfig::default(), &settings(20.0))
            .unwrap();
        let mut values = vec![-1.0; 4];
        proc.prime(&mut values);
        assert_eq!(values, [7510.0, 5.0, 0.0, -1.0]);
    }

    #[test]
    fn report_output_only_for_read_only() {
        let shared = shared();
        let mut proc =
            RenderProcessor::activate(shared.clone(), AudioConfig::default(), &settings(20.0))
                .unwrap();
        assert!(proc.report_output(ParamId(3), 0.7));
        assert!(!proc.report_output(ParamId(0), 0.7));
        assert!(!proc.report_output(ParamId(9), 0.7));
        assert_eq!(shared.value(ParamId(3)), Some(0.7));
        assert_eq!(proc.value(ParamId(3)), Some(0.7));
    }

    #[test]
    fn drop_leaves_deactivation_notice() {
        let shared = shared();
        {
            let _proc =
                RenderProcessor::activate(shared.clone(), AudioConfig::default(), &settings(20.0))
                    .unwrap();
            assert!(shared.is_active());
        }
        assert!(!shared.is_active());
        assert!(shared.take_deactivation_notice());
    }

    struct FnSink<'a, F: FnMut(ParamId, f64)>(&'a mut F);

    impl<F: FnMut(ParamId, f64)> ScaledSink for FnSink<'_, F> {
        fn set_scaled(&mut self, id: ParamId, value: f64) {
            (self.0)(id, value);
        }
    }
}
