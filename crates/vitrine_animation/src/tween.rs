//! Timed from→to animations
//!
//! A [`Tween`] interpolates a single `f32` over a fixed duration with an
//! easing curve, after an optional delay. Iterations and yoyo cover the
//! pulse-style animations (scale up, come back) used by indicators.

use crate::easing::Easing;

/// A single-value timed animation
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    delay_ms: f32,
    easing: Easing,
    /// Total play count; -1 repeats forever
    iterations: i32,
    /// Reverse direction on every other iteration
    yoyo: bool,

    playing: bool,
    reversed: bool,
    completed: i32,
    delay_left_ms: f32,
    time_ms: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f32) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            delay_ms: 0.0,
            easing: Easing::default(),
            iterations: 1,
            yoyo: false,
            playing: false,
            reversed: false,
            completed: 0,
            delay_left_ms: 0.0,
            time_ms: 0.0,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Set total play count (-1 for infinite)
    pub fn iterations(mut self, count: i32) -> Self {
        self.iterations = count;
        self
    }

    /// Reverse direction each iteration
    pub fn yoyo(mut self, enabled: bool) -> Self {
        self.yoyo = enabled;
        self
    }

    /// Begin playing from the start
    pub fn start(&mut self) {
        self.playing = true;
        self.reversed = false;
        self.completed = 0;
        self.delay_left_ms = self.delay_ms;
        self.time_ms = 0.0;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether all iterations have run to completion
    pub fn is_finished(&self) -> bool {
        !self.playing && self.completed > 0
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Linear progress through the current iteration, 0..=1
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.time_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        let t = if self.reversed {
            1.0 - self.progress()
        } else {
            self.progress()
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Advance by `dt_ms`; returns true while still playing
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        let mut dt = dt_ms.max(0.0);

        // Consume delay before the clock starts
        if self.delay_left_ms > 0.0 {
            if dt < self.delay_left_ms {
                self.delay_left_ms -= dt;
                return true;
            }
            dt -= self.delay_left_ms;
            self.delay_left_ms = 0.0;
        }

        self.time_ms += dt;

        while self.playing && self.time_ms >= self.duration_ms {
            self.completed += 1;
            let more = self.iterations < 0 || self.completed < self.iterations;
            if more {
                self.time_ms -= self.duration_ms;
                if self.yoyo {
                    self.reversed = !self.reversed;
                }
                if self.duration_ms <= 0.0 {
                    // Zero-length tween cannot loop meaningfully
                    self.playing = false;
                }
            } else {
                self.time_ms = self.duration_ms;
                self.playing = false;
            }
        }

        self.playing
    }
}
