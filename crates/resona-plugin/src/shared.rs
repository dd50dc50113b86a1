//! Lock-free state shared by the editing side and the rendering side.
//!
//! `ParamShared` lives for the lifetime of the plugin instance. Each
//! parameter owns one [`EditSlot`]: the latest normalized value (an `f64`
//! bit-cast to `u64`) plus a byte of pending flags. The writer stores the
//! value first and then raises a flag with `fetch_or`; the reader clears
//! the flags with `swap(0)` before loading the value, so it always sees a
//! value at least as new as the flag it consumed. Intermediate values may be
//! skipped; the last one always arrives.
//!
//! A snap raises its flag both before and after the value store. A reader
//! whose value load observes a snapped value is then guaranteed to find
//! [`SNAP`] still pending, so [`EditSlot::take`] never reports a loaded value
//! as an ordinary edit.
//!
//! Controllable parameters flow editing -> rendering ([`EDIT`], [`SNAP`]).
//! Read-only parameters flow rendering -> editing ([`OUTPUT`]).

use resona_core::{ParamError, ParamId, ParamSpec, ParamTable};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

/// Edit pending: ramp toward the new value.
pub const EDIT: u8 = 1;
/// State load pending: jump to the new value.
pub const SNAP: u8 = 2;
/// Output pending: the rendering side wrote a read-only value.
pub const OUTPUT: u8 = 4;

/// Single-writer, single-reader cell for one parameter.
#[derive(Debug)]
pub struct EditSlot {
    value: AtomicU64,
    flags: AtomicU8,
}

impl EditSlot {
    fn new(normalized: f64) -> Self {
        Self {
            value: AtomicU64::new(normalized.to_bits()),
            flags: AtomicU8::new(0),
        }
    }

    /// Stores `normalized` and raises `flag`.
    #[inline]
    pub fn publish(&self, normalized: f64, flag: u8) {
        self.value.store(normalized.to_bits(), Ordering::Release);
        self.flags.fetch_or(flag, Ordering::Release);
    }

    /// Stores `normalized` as a jump target.
    ///
    /// [`SNAP`] is raised before the value becomes visible and again after
    /// it, so the value is never picked up without the flag.
    #[inline]
    pub fn publish_snap(&self, normalized: f64) {
        self.flags.fetch_or(SNAP, Ordering::Release);
        self.value.store(normalized.to_bits(), Ordering::Release);
        self.flags.fetch_or(SNAP, Ordering::Release);
    }

    /// Clears and returns the pending flags.
    #[inline]
    pub fn take_flags(&self) -> u8 {
        self.flags.swap(0, Ordering::AcqRel)
    }

    /// Clears the pending flags and reads the value they refer to.
    ///
    /// Returns `None` when nothing is pending. [`SNAP`] is added to the
    /// returned flags when a snap landed between the swap and the load.
    #[inline]
    pub fn take(&self) -> Option<(u8, f64)> {
        let mut flags = self.take_flags();
        if flags == 0 {
            return None;
        }
        let value = self.load();
        if flags & SNAP == 0 && self.flags.load(Ordering::Acquire) & SNAP != 0 {
            flags |= SNAP;
        }
        Some((flags, value))
    }

    /// Latest published value.
    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.value.load(Ordering::Acquire))
    }
}

struct ParamSharedData {
    table: Arc<ParamTable>,
    slots: Vec<EditSlot>,
    bypassed: AtomicBool,
    active: AtomicBool,
    deactivated: AtomicBool,
    /// Called after editing-side writes so the host schedules a process or
    /// flush call even when playback is stopped.
    host_notify: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Shared state accessible from both sides.
///
/// Wraps an `Arc` so it can be cloned into the controller, the processor and
/// any GUI closures.
#[derive(Clone)]
pub struct ParamShared {
    inner: Arc<ParamSharedData>,
}

impl ParamShared {
    /// Creates shared state seeded with the table's initial values.
    ///
    /// `host_notify` is called after every editing-side write. Pass `None`
    /// for standalone and test use.
    pub fn new(table: Arc<ParamTable>, host_notify: Option<Box<dyn Fn() + Send + Sync>>) -> Self {
        let slots = table
            .iter()
            .map(|spec| EditSlot::new(spec.initial_normalized()))
            .collect();
        Self {
            inner: Arc::new(ParamSharedData {
                table,
                slots,
                bypassed: AtomicBool::new(false),
                active: AtomicBool::new(false),
                deactivated: AtomicBool::new(false),
                host_notify,
            }),
        }
    }

    /// The parameter table.
    pub fn table(&self) -> &ParamTable {
        &self.inner.table
    }

    /// A new handle to the parameter table.
    pub fn table_arc(&self) -> Arc<ParamTable> {
        Arc::clone(&self.inner.table)
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        self.inner.slots.len()
    }

    /// Spec and slot for `id`.
    pub fn slot(&self, id: ParamId) -> Result<(&ParamSpec, &EditSlot), ParamError> {
        let spec = self.inner.table.get(id)?;
        Ok((spec, &self.inner.slots[id.index()]))
    }

    /// All slots, indexed by id.
    pub fn slots(&self) -> &[EditSlot] {
        &self.inner.slots
    }

    /// Latest normalized value for `id`.
    pub fn value(&self, id: ParamId) -> Option<f64> {
        self.inner.slots.get(id.index()).map(EditSlot::load)
    }

    /// Publishes an edit for the rendering side to ramp toward.
    pub fn publish_edit(&self, id: ParamId, normalized: f64) -> Result<(), ParamError> {
        self.slot(id)?.1.publish(normalized, EDIT);
        self.notify_host();
        Ok(())
    }

    /// Publishes a value for the rendering side to jump to.
    pub fn publish_snap(&self, id: ParamId, normalized: f64) -> Result<(), ParamError> {
        self.slot(id)?.1.publish_snap(normalized);
        Ok(())
    }

    /// Publishes a read-only value from the rendering side.
    ///
    /// Ids that are out of range or not read-only are ignored.
    #[inline]
    pub fn publish_output(&self, id: ParamId, normalized: f64) -> bool {
        match self.slot(id) {
            Ok((spec, slot)) if spec.is_read_only() => {
                slot.publish(normalized, OUTPUT);
                true
            }
            _ => false,
        }
    }

    /// Clears and returns the pending flags for `id`.
    pub fn take_flags(&self, id: ParamId) -> u8 {
        self.inner
            .slots
            .get(id.index())
            .map_or(0, EditSlot::take_flags)
    }

    /// Whether the effect is bypassed.
    pub fn is_bypassed(&self) -> bool {
        self.inner.bypassed.load(Ordering::Acquire)
    }

    /// Sets the bypass switch. Written by the editing side only.
    pub fn set_bypassed(&self, bypassed: bool) {
        self.inner.bypassed.store(bypassed, Ordering::Release);
    }

    /// Whether a processor is live.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Marks a processor live. Returns `false` if one already is.
    pub(crate) fn try_activate(&self) -> bool {
        self.inner
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Marks the processor gone and leaves a notice for the editing side.
    pub(crate) fn release(&self) {
        self.inner.active.store(false, Ordering::Release);
        self.inner.deactivated.store(true, Ordering::Release);
    }

    /// Clears and returns the deactivation notice.
    pub fn take_deactivation_notice(&self) -> bool {
        self.inner.deactivated.swap(false, Ordering::AcqRel)
    }

    /// Asks the host to schedule a process or flush call.
    pub fn notify_host(&self) {
        if let Some(cb) = &self.inner.host_notify {
            cb();
        }
    }
}

impl std::fmt::Debug for ParamShared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamShared")
            .field("params", &self.param_count())
            .field("bypassed", &self.is_bypassed())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resona_core::TableOptions;
    use std::sync::atomic::AtomicUsize;

    fn shared(notify: Option<Box<dyn Fn() + Send + Sync>>) -> ParamShared {
        let table = ParamTable::new(
            vec![
                ParamSpec::linear(ParamId(0), "Frequency", "Freq", 20.0, 15000.0, 500.0)
                    .with_initial(7510.0),
                ParamSpec::linear(ParamId(1), "Mix", "Mix", 0.0, 1.0, 1.0),
            ],
            TableOptions::default(),
        )
        .unwrap();
        ParamShared::new(Arc::new(table), notify)
    }

    #[test]
    fn seeded_with_initial_values() {
        let shared = shared(None);
        assert_eq!(shared.param_count(), 2);
        assert_eq!(shared.value(ParamId(0)), Some(0.5));
        assert_eq!(shared.value(ParamId(1)), Some(1.0));
        assert_eq!(shared.value(ParamId(2)), None);
    }

    #[test]
    fn edit_flags_taken_once() {
        let shared = shared(None);
        assert_eq!(shared.take_flags(ParamId(0)), 0);

        shared.publish_edit(ParamId(0), 0.25).unwrap();
        assert_eq!(shared.take_flags(ParamId(0)), EDIT);
        assert_eq!(shared.take_flags(ParamId(0)), 0);
        assert_eq!(shared.value(ParamId(0)), Some(0.25));
    }

    #[test]
    fn flags_accumulate_and_last_value_wins() {
        let shared = shared(None);
        shared.publish_edit(ParamId(1), 0.1).unwrap();
        shared.publish_snap(ParamId(1), 0.9).unwrap();
        shared.publish_edit(ParamId(1), 0.4).unwrap();

        let flags = shared.take_flags(ParamId(1));
        assert_ne!(flags & EDIT, 0);
        assert_ne!(flags & SNAP, 0);
        assert_eq!(shared.value(ParamId(1)), Some(0.4));
    }

    #[test]
    fn snap_stays_pending_once_its_value_is_visible() {
        let shared = shared(None);
        let (_, slot) = shared.slot(ParamId(0)).unwrap();
        slot.publish(0.25, EDIT);

        // The reader swaps out the edit, then a state load completes before
        // the reader loads the value.
        let flags = slot.take_flags();
        slot.publish_snap(0.8);
        assert_eq!(flags, EDIT);
        assert_eq!(slot.load(), 0.8);
        assert_ne!(slot.flags.load(Ordering::Acquire) & SNAP, 0);

        assert_eq!(slot.take(), Some((SNAP, 0.8)));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn take_merges_edit_and_snap() {
        let shared = shared(None);
        let (_, slot) = shared.slot(ParamId(1)).unwrap();
        slot.publish(0.1, EDIT);
        slot.publish_snap(0.9);
        assert_eq!(slot.take(), Some((EDIT | SNAP, 0.9)));
    }

    #[test]
    fn out_of_range_publish_is_error() {
        let shared = shared(None);
        assert_eq!(
            shared.publish_edit(ParamId(5), 0.5),
            Err(ParamError::OutOfRange {
                id: ParamId(5),
                count: 2
            })
        );
        assert_eq!(shared.take_flags(ParamId(5)), 0);
    }

    #[test]
    fn edits_notify_host() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shared = shared(Some(Box::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })));

        shared.publish_edit(ParamId(0), 0.3).unwrap();
        shared.publish_edit(ParamId(1), 0.3).unwrap();
        shared.publish_snap(ParamId(1), 0.3).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn activation_is_exclusive() {
        let shared = shared(None);
        assert!(shared.try_activate());
        assert!(!shared.try_activate());
        assert!(shared.is_active());

        shared.release();
        assert!(!shared.is_active());
        assert!(shared.take_deactivation_notice());
        assert!(!shared.take_deactivation_notice());
        assert!(shared.try_activate());
    }

    #[test]
    fn bypass_roundtrip() {
        let shared = shared(None);
        assert!(!shared.is_bypassed());
        shared.set_bypassed(true);
        assert!(shared.clone().is_bypassed());
    }
}
