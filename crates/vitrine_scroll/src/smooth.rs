//! Smooth scroll engine
//!
//! Wraps raw wheel/touch deltas into a virtualized, eased scroll offset.
//! Input moves a raw target immediately; the eased offset chases it with a
//! fixed-duration exponential ease-out, re-launched from the current
//! position on every new input (the latest input always wins). Consumers
//! read the eased offset; the raw offset exists only as the target.
//!
//! Hosts that cannot or should not smooth (reduced-motion preference,
//! embedded contexts) construct [`NativeScroll`] instead, where eased and
//! raw are the same value. [`ScrollEngine`] abstracts over both.

use crate::error::ScrollError;
use crate::state::{scroll_events, ScrollMotion};
use vitrine_animation::{Easing, Tween};
use vitrine_core::{event_codes, StateTransitions};

/// Configuration for the smooth-scroll engine
///
/// Tuning values, not invariants.
#[derive(Clone, Copy, Debug)]
pub struct SmoothScrollConfig {
    /// Host opt-out; when false, `SmoothScroll::init` refuses and callers
    /// fall back to native scrolling
    pub enabled: bool,
    /// Duration of the ease toward the raw target
    pub duration_ms: f32,
    /// Easing curve for the chase
    pub easing: Easing,
    /// Multiplier applied to touch deltas
    pub touch_multiplier: f32,
    /// Whether touch input is smoothed at all
    pub smooth_touch: bool,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 1200.0,
            easing: Easing::EaseOutExpo,
            touch_multiplier: 2.0,
            smooth_touch: false,
        }
    }
}

/// Virtualized, eased scroll position
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    /// Where input says we should be
    raw_offset: f32,
    /// Where the eased position currently is
    eased_offset: f32,
    /// Maximum scrollable offset
    limit: f32,
    /// Chase animation toward `raw_offset` (None when settled)
    tween: Option<Tween>,
    motion: ScrollMotion,
}

impl SmoothScroll {
    /// Create the engine, or refuse if the host disabled smoothing
    pub fn init(config: SmoothScrollConfig) -> Result<Self, ScrollError> {
        if !config.enabled {
            return Err(ScrollError::EngineUnavailable(
                "disabled by host".to_string(),
            ));
        }
        if !config.duration_ms.is_finite() || config.duration_ms <= 0.0 {
            return Err(ScrollError::EngineUnavailable(format!(
                "invalid ease duration {}",
                config.duration_ms
            )));
        }
        Ok(Self {
            config,
            raw_offset: 0.0,
            eased_offset: 0.0,
            limit: 0.0,
            tween: None,
            motion: ScrollMotion::Idle,
        })
    }

    /// Set the maximum scrollable offset, clamping current positions
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.raw_offset = self.raw_offset.clamp(0.0, self.limit);
        self.eased_offset = self.eased_offset.clamp(0.0, self.limit);
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Apply a scroll input delta
    pub fn apply_delta(&mut self, delta: f32, touch: bool) {
        let delta = if touch {
            delta * self.config.touch_multiplier
        } else {
            delta
        };
        self.raw_offset = (self.raw_offset + delta).clamp(0.0, self.limit);
        self.motion.apply(event_codes::SCROLL);

        if touch && !self.config.smooth_touch {
            // Touch tracks the finger directly
            self.eased_offset = self.raw_offset;
            self.tween = None;
            return;
        }

        self.launch_chase(self.config.duration_ms, self.config.easing);
    }

    /// Programmatic scroll to an absolute offset
    pub fn scroll_to(&mut self, target: f32, duration_ms: f32, easing: Easing) {
        self.raw_offset = target.clamp(0.0, self.limit);
        self.motion.apply(event_codes::SCROLL);
        self.motion.apply(event_codes::SCROLL_END);
        if duration_ms <= 0.0 {
            self.eased_offset = self.raw_offset;
            self.tween = None;
            self.motion.apply(scroll_events::SETTLED);
        } else {
            self.launch_chase(duration_ms, easing);
        }
    }

    /// Mark the input gesture finished
    pub fn on_input_end(&mut self) {
        if self.tween.is_some() {
            self.motion.apply(event_codes::SCROLL_END);
        } else {
            self.motion.apply(scroll_events::SETTLED);
        }
    }

    /// Advance the chase; returns true while the eased offset is moving
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        let still_playing = tween.tick(dt_ms);
        self.eased_offset = tween.value();
        if !still_playing {
            self.tween = None;
            self.motion.apply(scroll_events::SETTLED);
        }
        still_playing
    }

    pub fn raw_offset(&self) -> f32 {
        self.raw_offset
    }

    pub fn eased_offset(&self) -> f32 {
        self.eased_offset
    }

    pub fn motion(&self) -> ScrollMotion {
        self.motion
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Re-launch the chase tween from the current eased position
    fn launch_chase(&mut self, duration_ms: f32, easing: Easing) {
        let mut tween = Tween::new(self.eased_offset, self.raw_offset, duration_ms).easing(easing);
        tween.start();
        self.tween = Some(tween);
    }
}

/// Unsmoothed fallback: eased and raw are the same value
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeScroll {
    offset: f32,
    limit: f32,
}

impl NativeScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.offset = self.offset.clamp(0.0, self.limit);
    }

    pub fn apply_delta(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(0.0, self.limit);
    }

    pub fn scroll_to(&mut self, target: f32) {
        self.offset = target.clamp(0.0, self.limit);
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

/// A scroll engine: eased when available, native otherwise
pub enum ScrollEngine {
    Smooth(SmoothScroll),
    Native(NativeScroll),
}

impl ScrollEngine {
    /// Whether the eased engine is active (false after fallback)
    pub fn is_smooth(&self) -> bool {
        matches!(self, ScrollEngine::Smooth(_))
    }

    pub fn set_limit(&mut self, limit: f32) {
        match self {
            ScrollEngine::Smooth(s) => s.set_limit(limit),
            ScrollEngine::Native(n) => n.set_limit(limit),
        }
    }

    pub fn apply_delta(&mut self, delta: f32, touch: bool) {
        match self {
            ScrollEngine::Smooth(s) => s.apply_delta(delta, touch),
            ScrollEngine::Native(n) => n.apply_delta(delta),
        }
    }

    pub fn scroll_to(&mut self, target: f32, duration_ms: f32, easing: Easing) {
        match self {
            ScrollEngine::Smooth(s) => s.scroll_to(target, duration_ms, easing),
            ScrollEngine::Native(n) => n.scroll_to(target),
        }
    }

    pub fn on_input_end(&mut self) {
        if let ScrollEngine::Smooth(s) = self {
            s.on_input_end();
        }
    }

    /// Advance; returns true while still animating
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        match self {
            ScrollEngine::Smooth(s) => s.tick(dt_ms),
            ScrollEngine::Native(_) => false,
        }
    }

    /// The offset consumers should render from
    pub fn eased_offset(&self) -> f32 {
        match self {
            ScrollEngine::Smooth(s) => s.eased_offset(),
            ScrollEngine::Native(n) => n.offset(),
        }
    }

    pub fn raw_offset(&self) -> f32 {
        match self {
            ScrollEngine::Smooth(s) => s.raw_offset(),
            ScrollEngine::Native(n) => n.offset(),
        }
    }
}
