//! Pin registry
//!
//! Pinned sections register under a string identifier. Registering an
//! identifier that already exists REPLACES the previous pin — sections
//! re-establish their binding on rebuild without accumulating duplicates.
//! Callbacks are plain `FnMut` (single-threaded UI, same as the rest of
//! the workspace).

use crate::progress::PinnedTracker;
use rustc_hash::FxHashMap;

/// Progress callback invoked on every scroll observation
pub type ProgressCallback = Box<dyn FnMut(f32)>;

/// One pinned section: its tracker plus the track content size it was
/// last measured with
pub struct Pin {
    tracker: PinnedTracker,
    track_size: f32,
    callback: Option<ProgressCallback>,
}

impl Pin {
    pub fn new(tracker: PinnedTracker, track_size: f32) -> Self {
        Self {
            tracker,
            track_size,
            callback: None,
        }
    }

    /// Attach a progress callback
    pub fn on_update(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Update the measured track content size (next invalidation uses it)
    pub fn set_track_size(&mut self, size: f32) {
        self.track_size = size;
    }

    pub fn tracker(&self) -> &PinnedTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut PinnedTracker {
        &mut self.tracker
    }

    fn observe(&mut self, offset: f32) {
        let progress = self.tracker.observe(offset);
        if let Some(callback) = self.callback.as_mut() {
            callback(progress);
        }
    }

    fn invalidate(&mut self, viewport: f32) {
        self.tracker.invalidate(self.track_size, viewport);
    }
}

/// Registry of pinned sections, keyed by identifier
#[derive(Default)]
pub struct PinRegistry {
    pins: FxHashMap<String, Pin>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pin, replacing any existing registration under `id`
    pub fn register(&mut self, id: &str, pin: Pin) {
        if self.pins.insert(id.to_string(), pin).is_some() {
            tracing::debug!(id, "replacing pinned-scroll registration");
        }
    }

    /// Remove a registration; returns true if one existed
    pub fn unregister(&mut self, id: &str) -> bool {
        self.pins.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pins.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Pin> {
        self.pins.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Pin> {
        self.pins.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn clear(&mut self) {
        self.pins.clear();
    }

    /// Fan a scroll observation out to every pin
    pub fn dispatch_scroll(&mut self, offset: f32) {
        for pin in self.pins.values_mut() {
            pin.observe(offset);
        }
    }

    /// Fan a resize invalidation out to every pin
    pub fn dispatch_resize(&mut self, viewport: f32) {
        for pin in self.pins.values_mut() {
            pin.invalidate(viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ExtentPolicy;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tracker() -> PinnedTracker {
        let mut t = PinnedTracker::new(ExtentPolicy::TrackOrViewport { factor: 2.0 });
        t.invalidate(1000.0, 400.0);
        t
    }

    #[test]
    fn reregister_replaces_not_duplicates() {
        let mut registry = PinRegistry::new();
        registry.register("gallery", Pin::new(tracker(), 1000.0));
        registry.register("gallery", Pin::new(tracker(), 2000.0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn dispatch_reaches_callbacks() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut registry = PinRegistry::new();
        registry.register(
            "gallery",
            Pin::new(tracker(), 1000.0).on_update(move |p| sink.borrow_mut().push(p)),
        );

        registry.dispatch_scroll(500.0);
        registry.dispatch_scroll(1000.0);
        assert_eq!(seen.borrow().len(), 2);
        assert!((seen.borrow()[0] - 0.5).abs() < 1e-6);
        assert!((seen.borrow()[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unregister_then_dispatch_is_silent() {
        let seen = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&seen);

        let mut registry = PinRegistry::new();
        registry.register(
            "gallery",
            Pin::new(tracker(), 1000.0).on_update(move |_| *sink.borrow_mut() += 1),
        );
        assert!(registry.unregister("gallery"));
        assert!(!registry.unregister("gallery"));

        registry.dispatch_scroll(500.0);
        assert_eq!(*seen.borrow(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn resize_invalidates_with_stored_track_size() {
        let mut registry = PinRegistry::new();
        registry.register("gallery", Pin::new(tracker(), 3000.0));
        registry.dispatch_resize(1280.0);
        assert_eq!(
            registry.get("gallery").unwrap().tracker().extent(),
            3000.0
        );

        registry.get_mut("gallery").unwrap().set_track_size(100.0);
        registry.dispatch_resize(1280.0);
        assert_eq!(
            registry.get("gallery").unwrap().tracker().extent(),
            2560.0
        );
    }
}
