//! Progress indicator
//!
//! The lateral indicator has a fill bar tracking section progress and one
//! dot per panel. The fill is smoothed over a short window so scrubbing
//! does not stutter — the authoritative progress value is never touched,
//! only this visual copy. The active dot pulses once per index change.

use vitrine_animation::{AnimatedTween, Easing, SchedulerHandle, Tween};
use vitrine_core::{TargetId, VisualBackend, VisualProp};

/// Dot pulse peak scale
const PULSE_SCALE: f32 = 1.3;
/// Dot pulse leg duration, ms
const PULSE_LEG_MS: f32 = 200.0;

/// Fill bar plus per-panel dots
pub struct ProgressIndicator {
    fill_target: Option<TargetId>,
    fill: AnimatedTween,
    smoothing_ms: f32,
    dots: Vec<Dot>,
}

struct Dot {
    target: Option<TargetId>,
    scale: AnimatedTween,
}

impl ProgressIndicator {
    pub fn new(
        handle: SchedulerHandle,
        fill_target: Option<TargetId>,
        dot_targets: Vec<Option<TargetId>>,
        smoothing_ms: f32,
    ) -> Self {
        let dots = dot_targets
            .into_iter()
            .map(|target| Dot {
                target,
                scale: AnimatedTween::new(handle.clone(), 1.0),
            })
            .collect();
        Self {
            fill_target,
            fill: AnimatedTween::new(handle, 0.0),
            smoothing_ms,
            dots,
        }
    }

    /// Smooth the fill toward the authoritative progress value
    ///
    /// Re-observing an unchanged value does not relaunch the tween, so the
    /// fill actually settles between scroll ticks.
    pub fn set_progress(&mut self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        if (self.fill.target() - progress).abs() > f32::EPSILON {
            self.fill
                .animate_to(progress, self.smoothing_ms, Easing::Linear);
        }
    }

    /// Pulse the dot for a newly active index
    pub fn pulse(&mut self, index: usize) {
        if let Some(dot) = self.dots.get_mut(index) {
            let mut pulse = Tween::new(1.0, PULSE_SCALE, PULSE_LEG_MS)
                .easing(Easing::EaseOutQuad)
                .iterations(2)
                .yoyo(true);
            pulse.start();
            dot.scale.play(pulse);
        }
    }

    /// Smoothed fill value currently displayed
    pub fn fill_value(&self) -> f32 {
        self.fill.get()
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    /// Write fill and dot values through the backend
    pub fn sample(&self, backend: &mut dyn VisualBackend) {
        if let Some(target) = self.fill_target {
            backend.apply(target, VisualProp::FillAmount, self.fill.get());
        }
        for dot in &self.dots {
            if let Some(target) = dot.target {
                backend.apply(target, VisualProp::Scale, dot.scale.get());
            }
        }
    }
}
