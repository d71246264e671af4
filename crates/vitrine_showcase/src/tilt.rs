//! Pointer-driven card tilt
//!
//! Each card rests at a per-card base rotation assigned once at setup,
//! derived deterministically from the card's seed so a reload shows the
//! same arrangement. Pointer movement inside a card's bounds retargets a
//! single rotation tween — the latest sample always wins, there is no
//! queue — and leaving animates back to the base pair. The whole effect
//! is inert below the mobile breakpoint.

use vitrine_animation::{Easing, Interpolate, TypedTween};
use vitrine_core::{Point, Rect, TargetId, VisualBackend, VisualProp};

/// Tilt tuning
#[derive(Clone, Copy, Debug)]
pub struct TiltConfig {
    /// Rotation range, degrees (pointer at an edge reaches ±max)
    pub max_degrees: f32,
    /// Response to a pointer sample, ms
    pub response_ms: f32,
    /// Recovery to the base pair after pointer leave, ms
    pub recover_ms: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_degrees: 12.0,
            response_ms: 300.0,
            recover_ms: 600.0,
        }
    }
}

/// A rotation pair, degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltAngles {
    pub x: f32,
    pub y: f32,
}

impl TiltAngles {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Interpolate for TiltAngles {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

/// Deterministic per-card base rotation, uniform in ±max
///
/// splitmix64 over the seed; no RNG state to carry around.
pub fn base_rotation(seed: u64, max_degrees: f32) -> TiltAngles {
    fn splitmix64(state: &mut u64) -> u64 {
        *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = *state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    let mut state = seed;
    let unit = |bits: u64| (bits >> 11) as f32 / (1u64 << 53) as f32;
    let x = (unit(splitmix64(&mut state)) - 0.5) * 2.0 * max_degrees;
    let y = (unit(splitmix64(&mut state)) - 0.5) * 2.0 * max_degrees;
    TiltAngles::new(x, y)
}

struct CardTilt {
    target: Option<TargetId>,
    bounds: Rect,
    base: TiltAngles,
    tween: TypedTween<TiltAngles>,
}

/// Tilt state for a set of cards
pub struct TiltController {
    config: TiltConfig,
    cards: Vec<CardTilt>,
    enabled: bool,
}

impl TiltController {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            cards: Vec::new(),
            enabled: true,
        }
    }

    /// Add a card; returns its index
    pub fn add_card(&mut self, target: Option<TargetId>, bounds: Rect, seed: u64) -> usize {
        let base = base_rotation(seed, self.config.max_degrees);
        self.cards.push(CardTilt {
            target,
            bounds,
            base,
            tween: TypedTween::new(base),
        });
        self.cards.len() - 1
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Base rotation pair for a card
    pub fn base(&self, index: usize) -> Option<TiltAngles> {
        self.cards.get(index).map(|c| c.base)
    }

    /// Current rotation pair for a card
    pub fn current(&self, index: usize) -> Option<TiltAngles> {
        self.cards.get(index).map(|c| c.tween.value())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable/disable the effect (mobile layouts disable it)
    ///
    /// Disabling snaps every card back to its base pair.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            for card in &mut self.cards {
                card.tween.set_immediate(card.base);
            }
        }
    }

    /// Update a card's bounds after layout changes
    pub fn set_bounds(&mut self, index: usize, bounds: Rect) {
        if let Some(card) = self.cards.get_mut(index) {
            card.bounds = bounds;
        }
    }

    /// Index of the card containing an absolute pointer position
    pub fn card_at(&self, position: Point) -> Option<usize> {
        self.cards.iter().position(|c| c.bounds.contains(position))
    }

    /// Pointer moved inside a card's bounds
    pub fn pointer_move(&mut self, index: usize, position: Point) {
        if !self.enabled {
            return;
        }
        let response_ms = self.config.response_ms;
        let max = self.config.max_degrees;
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };

        let half_w = card.bounds.size.width * 0.5;
        let half_h = card.bounds.size.height * 0.5;
        if half_w <= 0.0 || half_h <= 0.0 {
            return;
        }

        let local = card.bounds.to_local(position);
        let rotate_x = ((local.y - half_h) / half_h) * -max;
        let rotate_y = ((local.x - half_w) / half_w) * max;

        card.tween.animate_to(
            TiltAngles::new(rotate_x, rotate_y),
            response_ms,
            Easing::EaseOutQuad,
        );
    }

    /// Pointer left a card: ease back to its base pair
    pub fn pointer_leave(&mut self, index: usize) {
        if !self.enabled {
            return;
        }
        let recover_ms = self.config.recover_ms;
        if let Some(card) = self.cards.get_mut(index) {
            card.tween
                .animate_to(card.base, recover_ms, Easing::EaseOutQuad);
        }
    }

    /// Advance tweens and write rotations; returns true while any card is
    /// still animating
    pub fn tick(&mut self, dt_ms: f32, backend: &mut dyn VisualBackend) -> bool {
        let mut animating = false;
        for card in &mut self.cards {
            animating |= card.tween.tick(dt_ms);
            if let Some(target) = card.target {
                let angles = card.tween.value();
                backend.apply(target, VisualProp::RotateX, angles.x);
                backend.apply(target, VisualProp::RotateY, angles.y);
            }
        }
        animating
    }
}
