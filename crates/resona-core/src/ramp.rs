//! Linear value ramps for glitch-free parameter changes.
//!
//! [`RampedValue`] moves from its current value to a target over a fixed
//! number of steps. One step is one sample, or one block when the caller
//! advances per block. Every operation is O(1), allocation-free and
//! infallible, so it runs on the audio thread.

/// Per-parameter linear smoothing generator.
///
/// The current value is always recomputed from the target end
/// (`target - remaining * delta`), so rounding error never accumulates and
/// the final step lands exactly on the target.
///
/// # Example
///
/// ```rust
/// use resona_core::RampedValue;
///
/// let mut freq = RampedValue::new(7510.0);
/// freq.set_target(15000.0, 4);
///
/// assert_eq!(freq.advance(), 9382.5);
/// assert_eq!(freq.advance(), 11255.0);
/// assert_eq!(freq.advance(), 13127.5);
/// assert_eq!(freq.advance(), 15000.0);
/// assert!(freq.is_settled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampedValue {
    current: f64,
    target: f64,
    delta: f64,
    remaining: u32,
    total: u32,
}

impl RampedValue {
    /// Settled ramp at `value`.
    pub const fn new(value: f64) -> Self {
        Self {
            current: value,
            target: value,
            delta: 0.0,
            remaining: 0,
            total: 0,
        }
    }

    /// Starts a ramp from the current value to `target` over `steps` steps.
    ///
    /// Setting the same target again is a no-op, so repeated edits do not
    /// restart the ramp. `steps == 0` jumps immediately.
    #[inline]
    pub fn set_target(&mut self, target: f64, steps: u32) {
        if target == self.target {
            return;
        }
        self.target = target;
        if steps == 0 {
            self.snap(target);
            return;
        }
        self.delta = (target - self.current) / f64::from(steps);
        self.remaining = steps;
        self.total = steps;
    }

    /// Jumps to `value` and settles there.
    #[inline]
    pub fn snap(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.delta = 0.0;
        self.remaining = 0;
        self.total = 0;
    }

    /// Finishes the running ramp immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.snap(self.target);
    }

    /// Advances one step and returns the new current value.
    #[inline]
    pub fn advance(&mut self) -> f64 {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.current = self.target - f64::from(self.remaining) * self.delta;
        }
        self.current
    }

    /// Advances `steps` steps at once.
    #[inline]
    pub fn advance_by(&mut self, steps: u32) -> f64 {
        if self.remaining > 0 {
            self.remaining = self.remaining.saturating_sub(steps);
            self.current = self.target - f64::from(self.remaining) * self.delta;
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Steps left in the running ramp.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Length of the running ramp.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// `true` once the target is reached.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }
}

impl Default for RampedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Ramp length in samples for a smoothing time in milliseconds.
///
/// Negative or non-finite inputs give 0 (jump).
#[inline]
pub fn ramp_samples(smoothing_ms: f64, sample_rate: f64) -> u32 {
    let samples = smoothing_ms / 1000.0 * sample_rate;
    if samples.is_finite() && samples > 0.0 {
        libm::round(samples) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_after_exact_steps() {
        let mut ramp = RampedValue::new(0.0);
        ramp.set_target(1.0, 480);
        for _ in 0..479 {
            ramp.advance();
            assert!(!ramp.is_settled());
        }
        assert_eq!(ramp.advance(), 1.0);
        assert!(ramp.is_settled());
    }

    #[test]
    fn repeated_target_does_not_restart() {
        let mut ramp = RampedValue::new(0.0);
        ramp.set_target(1.0, 10);
        ramp.advance();
        ramp.advance();
        ramp.set_target(1.0, 10);
        assert_eq!(ramp.remaining(), 8);
        assert_eq!(ramp.total(), 10);
    }

    #[test]
    fn zero_steps_jumps() {
        let mut ramp = RampedValue::new(0.25);
        ramp.set_target(0.75, 0);
        assert!(ramp.is_settled());
        assert_eq!(ramp.current(), 0.75);
        assert_eq!(ramp.advance(), 0.75);
    }

    #[test]
    fn retarget_mid_ramp_starts_from_current() {
        let mut ramp = RampedValue::new(0.0);
        ramp.set_target(1.0, 4);
        ramp.advance();
        ramp.advance();
        assert_eq!(ramp.current(), 0.5);

        ramp.set_target(0.0, 2);
        assert_eq!(ramp.advance(), 0.25);
        assert_eq!(ramp.advance(), 0.0);
    }

    #[test]
    fn settled_advance_is_stable() {
        let mut ramp = RampedValue::new(3.0);
        for _ in 0..5 {
            assert_eq!(ramp.advance(), 3.0);
        }
    }

    #[test]
    fn advance_by_saturates() {
        let mut ramp = RampedValue::new(0.0);
        ramp.set_target(8.0, 8);
        assert_eq!(ramp.advance_by(3), 3.0);
        assert_eq!(ramp.advance_by(100), 8.0);
        assert!(ramp.is_settled());
    }

    #[test]
    fn snap_clears_ramp() {
        let mut ramp = RampedValue::new(0.0);
        ramp.set_target(1.0, 100);
        ramp.advance();
        ramp.snap(0.3);
        assert!(ramp.is_settled());
        assert_eq!(ramp.target(), 0.3);
        assert_eq!(ramp.advance(), 0.3);

        ramp.set_target(0.9, 10);
        ramp.snap_to_target();
        assert_eq!(ramp.current(), 0.9);
    }

    #[test]
    fn ramp_samples_from_ms() {
        assert_eq!(ramp_samples(20.0, 48000.0), 960);
        assert_eq!(ramp_samples(0.0, 48000.0), 0);
        assert_eq!(ramp_samples(-5.0, 48000.0), 0);
        assert_eq!(ramp_samples(f64::NAN, 48000.0), 0);
    }
}
