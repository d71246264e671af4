//! Loading gate and asset preloader
//!
//! The gate holds the host page behind an overlay until critical assets
//! and the page-ready signal have arrived, then ramps the displayed
//! percentage to 100 and plays the dismissal (text fades, overlay slides
//! off). `finish` is idempotent — asset completion, the page-load path,
//! and the safety timeout can all race into it safely. A load failure
//! counts as completion: a missing image degrades the page, it does not
//! hold it hostage.

use rustc_hash::FxHashMap;
use vitrine_animation::{
    AnimatedTimeline, AnimatedTween, Easing, SchedulerHandle, Timeline, TimelineEntryId,
};
use vitrine_core::{TargetId, VisualBackend, VisualProp};

/// Coalescing asset tracker
///
/// Requesting a URL twice is one load; completion (success or failure)
/// marks it done.
#[derive(Default)]
pub struct Preloader {
    states: FxHashMap<String, bool>,
}

impl Preloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a URL; returns false if empty or already requested
    pub fn request(&mut self, url: &str) -> bool {
        if url.is_empty() || self.states.contains_key(url) {
            return false;
        }
        self.states.insert(url.to_string(), false);
        true
    }

    /// Mark a URL finished (loaded or failed); returns false if unknown
    pub fn complete(&mut self, url: &str) -> bool {
        match self.states.get_mut(url) {
            Some(done) => {
                *done = true;
                true
            }
            None => false,
        }
    }

    pub fn total(&self) -> usize {
        self.states.len()
    }

    pub fn done_count(&self) -> usize {
        self.states.values().filter(|d| **d).count()
    }

    /// Completed fraction; an empty tracker counts as fully done
    pub fn fraction(&self) -> f32 {
        if self.states.is_empty() {
            return 1.0;
        }
        self.done_count() as f32 / self.total() as f32
    }

    pub fn all_done(&self) -> bool {
        self.states.values().all(|d| *d)
    }
}

/// Loading gate tuning
#[derive(Clone, Copy, Debug)]
pub struct GateConfig {
    /// Hard ceiling on how long the gate may hold the page
    pub safety_timeout_ms: f32,
    /// Final percent ramp duration
    pub ramp_ms: f32,
    /// Per-asset percent step smoothing
    pub step_ms: f32,
    /// Dismissal: text fade duration
    pub text_fade_ms: f32,
    /// Dismissal: overlay slide duration and its delay
    pub overlay_ms: f32,
    pub overlay_delay_ms: f32,
    /// Displayed percent before anything has loaded
    pub initial_percent: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            safety_timeout_ms: 9000.0,
            ramp_ms: 800.0,
            step_ms: 250.0,
            text_fade_ms: 600.0,
            overlay_ms: 900.0,
            overlay_delay_ms: 200.0,
            initial_percent: 5.0,
        }
    }
}

/// Gate lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Waiting on assets and the page-ready signal
    Holding,
    /// Ramping the displayed percent to 100
    Ramping,
    /// Playing the dismissal sequence
    Dismissing,
    Done,
}

struct Dismissal {
    timeline: AnimatedTimeline,
    bindings: Vec<(TimelineEntryId, TargetId, VisualProp)>,
}

/// Holds the page until assets are ready, then dismisses itself
pub struct LoadingGate {
    handle: SchedulerHandle,
    config: GateConfig,
    preloader: Preloader,
    state: GateState,
    percent: AnimatedTween,
    page_ready: bool,
    safety_left_ms: f32,
    finish_called: bool,
    overlay_target: Option<TargetId>,
    text_target: Option<TargetId>,
    dismissal: Option<Dismissal>,
    ready_callbacks: Vec<Box<dyn FnMut()>>,
    ready_emitted: bool,
}

impl LoadingGate {
    pub fn new(handle: SchedulerHandle, config: GateConfig) -> Self {
        let percent = AnimatedTween::new(handle.clone(), config.initial_percent);
        Self {
            handle,
            config,
            preloader: Preloader::new(),
            state: GateState::Holding,
            percent,
            page_ready: false,
            safety_left_ms: config.safety_timeout_ms,
            finish_called: false,
            overlay_target: None,
            text_target: None,
            dismissal: None,
            ready_callbacks: Vec::new(),
            ready_emitted: false,
        }
    }

    /// Elements the dismissal sequence animates
    pub fn with_targets(mut self, overlay: Option<TargetId>, text: Option<TargetId>) -> Self {
        self.overlay_target = overlay;
        self.text_target = text;
        self
    }

    /// Track a critical asset
    pub fn track(&mut self, url: &str) -> bool {
        self.preloader.request(url)
    }

    /// An asset finished loading (or failed — both count)
    pub fn asset_loaded(&mut self, url: &str) {
        if self.preloader.complete(url) && self.state == GateState::Holding {
            let target = self.preloader.fraction() * 100.0;
            self.percent
                .animate_to(target, self.config.step_ms, Easing::Linear);
        }
    }

    /// The host page finished its own load
    pub fn set_page_ready(&mut self) {
        self.page_ready = true;
    }

    /// Register a callback for the single ready emission
    ///
    /// Registered after the gate is done, it fires immediately.
    pub fn on_ready(&mut self, mut callback: impl FnMut() + 'static) {
        if self.ready_emitted {
            callback();
        } else {
            self.ready_callbacks.push(Box::new(callback));
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Displayed percent, rounded
    pub fn percent(&self) -> u32 {
        self.percent.get().round().clamp(0.0, 100.0) as u32
    }

    /// The page stays scroll-locked until the overlay is gone
    pub fn is_scroll_locked(&self) -> bool {
        self.state != GateState::Done
    }

    /// Force completion regardless of outstanding assets
    ///
    /// Idempotent: only the first call starts the dismissal.
    pub fn finish(&mut self) {
        if self.finish_called {
            return;
        }
        self.finish_called = true;
        self.state = GateState::Dismissing;
        self.percent.set_immediate(100.0);
        self.dismissal = self.build_dismissal();
        if let Some(d) = &self.dismissal {
            d.timeline.start();
        }
    }

    /// Advance the gate; returns the state after this frame
    pub fn tick(&mut self, dt_ms: f32, backend: &mut dyn VisualBackend) -> GateState {
        if self.state == GateState::Done {
            return self.state;
        }

        // Safety ceiling applies until finish is underway
        if !self.finish_called {
            self.safety_left_ms -= dt_ms;
            if self.safety_left_ms <= 0.0 {
                tracing::warn!("loading gate hit its safety timeout, forcing dismissal");
                self.finish();
            }
        }

        match self.state {
            GateState::Holding => {
                if self.preloader.all_done() && self.page_ready {
                    self.state = GateState::Ramping;
                    self.percent
                        .animate_to(100.0, self.config.ramp_ms, Easing::EaseOutQuad);
                }
            }
            GateState::Ramping => {
                if !self.percent.is_animating() {
                    self.finish();
                }
            }
            GateState::Dismissing => {
                let finished = match &self.dismissal {
                    Some(d) => {
                        for &(entry, target, prop) in &d.bindings {
                            if let Some(value) = d.timeline.value(entry) {
                                backend.apply(target, prop, value);
                            }
                        }
                        d.timeline.is_finished()
                    }
                    None => true,
                };
                if finished {
                    self.dismissal = None;
                    self.state = GateState::Done;
                    self.emit_ready();
                }
            }
            GateState::Done => {}
        }

        self.state
    }

    fn emit_ready(&mut self) {
        if self.ready_emitted {
            return;
        }
        self.ready_emitted = true;
        for callback in self.ready_callbacks.iter_mut() {
            callback();
        }
        self.ready_callbacks.clear();
        tracing::debug!("loading gate dismissed, page revealed");
    }

    fn build_dismissal(&self) -> Option<Dismissal> {
        let mut timeline = Timeline::new();
        let mut bindings = Vec::new();

        if let Some(text) = self.text_target {
            let opacity = timeline.add_with_easing(
                0.0,
                self.config.text_fade_ms,
                1.0,
                0.6,
                Easing::EaseOutQuad,
            );
            let lift = timeline.add_with_easing(
                0.0,
                self.config.text_fade_ms,
                0.0,
                -6.0,
                Easing::EaseOutQuad,
            );
            bindings.push((opacity, text, VisualProp::Opacity));
            bindings.push((lift, text, VisualProp::TranslateY));
        }

        if let Some(overlay) = self.overlay_target {
            // Slide the full overlay off the top, as a percentage of its height
            let slide = timeline.add_with_easing(
                self.config.overlay_delay_ms,
                self.config.overlay_ms,
                0.0,
                -100.0,
                Easing::EaseInOutCubic,
            );
            bindings.push((slide, overlay, VisualProp::TranslateY));
        }

        if bindings.is_empty() {
            return None;
        }
        Some(Dismissal {
            timeline: AnimatedTimeline::from_timeline(self.handle.clone(), timeline),
            bindings,
        })
    }
}
