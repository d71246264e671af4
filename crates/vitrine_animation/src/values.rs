//! Animatable value types
//!
//! [`Interpolate`] abstracts "values a tween can blend"; [`TypedTween`]
//! animates any such value. Multi-component values (for example a rotation
//! pair) animate as one unit so both components share a clock and an
//! easing curve.

use crate::easing::Easing;
use vitrine_core::Vec2;

/// Values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Blend from self toward other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Approximate equality, for settle checks
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

/// A timed animation over any interpolatable value
///
/// Unlike [`crate::Tween`] this is not registered with the scheduler; the
/// owner ticks it directly. Retargeting restarts the clock from the
/// current in-flight value, so the newest target always wins.
#[derive(Clone, Debug)]
pub struct TypedTween<T: Interpolate> {
    from: T,
    to: T,
    duration_ms: f32,
    easing: Easing,
    time_ms: f32,
    playing: bool,
}

impl<T: Interpolate> TypedTween<T> {
    /// Create a settled tween holding `value`
    pub fn new(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            duration_ms: 0.0,
            easing: Easing::default(),
            time_ms: 0.0,
            playing: false,
        }
    }

    /// Animate from the current value to `target`, replacing any in-flight
    /// animation
    pub fn animate_to(&mut self, target: T, duration_ms: f32, easing: Easing) {
        self.from = self.value();
        self.to = target;
        self.duration_ms = duration_ms.max(0.0);
        self.easing = easing;
        self.time_ms = 0.0;
        self.playing = self.duration_ms > 0.0;
        if !self.playing {
            self.from = self.to.clone();
        }
    }

    /// Jump to `value` immediately, cancelling any animation
    pub fn set_immediate(&mut self, value: T) {
        self.from = value.clone();
        self.to = value;
        self.time_ms = 0.0;
        self.playing = false;
    }

    pub fn is_animating(&self) -> bool {
        self.playing
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    /// Current blended value
    pub fn value(&self) -> T {
        if !self.playing || self.duration_ms <= 0.0 {
            return self.to.clone();
        }
        let t = (self.time_ms / self.duration_ms).clamp(0.0, 1.0);
        self.from.lerp(&self.to, self.easing.apply(t))
    }

    /// Advance by `dt_ms`; returns true while still animating
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }
        self.time_ms += dt_ms.max(0.0);
        if self.time_ms >= self.duration_ms {
            self.time_ms = self.duration_ms;
            self.playing = false;
        }
        self.playing
    }
}
