//! Scroll context
//!
//! The single owner of scrolling state for a page: one engine (smooth or
//! native fallback), one pin registry, one viewport. Components receive a
//! mutable borrow or operate through the registry; nothing here is a
//! process-wide global, and teardown releases every registration.

use crate::pin::{Pin, PinRegistry};
use crate::smooth::{NativeScroll, ScrollEngine, SmoothScroll, SmoothScrollConfig};
use vitrine_animation::Easing;
use vitrine_core::{EventType, InputEvent, Viewport};

/// Owns the scroll engine and all pinned-section registrations
pub struct ScrollContext {
    engine: ScrollEngine,
    pins: PinRegistry,
    viewport: Viewport,
}

impl ScrollContext {
    /// Create a context with the eased engine, falling back to native
    /// scrolling if the engine is unavailable
    pub fn new(config: SmoothScrollConfig, viewport: Viewport) -> Self {
        let engine = match SmoothScroll::init(config) {
            Ok(smooth) => ScrollEngine::Smooth(smooth),
            Err(err) => {
                tracing::warn!(error = %err, "smooth scrolling unavailable, using native scroll");
                ScrollEngine::Native(NativeScroll::new())
            }
        };
        Self {
            engine,
            pins: PinRegistry::new(),
            viewport,
        }
    }

    /// Whether the eased engine is active
    pub fn is_smooth(&self) -> bool {
        self.engine.is_smooth()
    }

    /// Set the total scrollable content height
    pub fn set_content_limit(&mut self, limit: f32) {
        self.engine.set_limit(limit);
    }

    /// Update the viewport and invalidate every pin's extent
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.pins.dispatch_resize(viewport.width);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Feed a host input event into the engine
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event.event_type {
            EventType::Scroll => {
                self.engine.apply_delta(event.scroll_delta_y, false);
            }
            EventType::ScrollEnd => {
                self.engine.on_input_end();
            }
            _ => {}
        }
    }

    /// Feed a touch-drag delta (multiplied and, by default, unsmoothed)
    pub fn apply_touch_delta(&mut self, delta: f32) {
        self.engine.apply_delta(delta, true);
    }

    /// Programmatic scroll to an absolute offset
    pub fn scroll_to(&mut self, offset: f32, duration_ms: f32, easing: Easing) {
        self.engine.scroll_to(offset, duration_ms, easing);
    }

    /// Advance the engine and fan the eased offset out to every pin
    ///
    /// Returns true while the eased offset is still moving.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let moving = self.engine.tick(dt_ms);
        self.pins.dispatch_scroll(self.engine.eased_offset());
        moving
    }

    pub fn eased_offset(&self) -> f32 {
        self.engine.eased_offset()
    }

    pub fn raw_offset(&self) -> f32 {
        self.engine.raw_offset()
    }

    // =========================================================================
    // Pins
    // =========================================================================

    /// Register a pinned section (same id replaces)
    pub fn register_pin(&mut self, id: &str, pin: Pin) {
        self.pins.register(id, pin);
        // Bring the new pin's extent up to date with the current viewport
        self.pins.dispatch_resize(self.viewport.width);
    }

    /// Remove a pinned section; returns true if it existed
    pub fn unregister_pin(&mut self, id: &str) -> bool {
        self.pins.unregister(id)
    }

    /// Progress of a registered pin
    pub fn pin_progress(&self, id: &str) -> Option<f32> {
        self.pins.get(id).map(|p| p.tracker().progress())
    }

    pub fn pin(&self, id: &str) -> Option<&Pin> {
        self.pins.get(id)
    }

    pub fn pin_mut(&mut self, id: &str) -> Option<&mut Pin> {
        self.pins.get_mut(id)
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Release every registration
    ///
    /// Idempotent; also runs on drop.
    pub fn teardown(&mut self) {
        if !self.pins.is_empty() {
            tracing::debug!(pins = self.pins.len(), "tearing down scroll context");
        }
        self.pins.clear();
    }
}

impl Drop for ScrollContext {
    fn drop(&mut self) {
        self.teardown();
    }
}
