//! The floating-cards section
//!
//! Cards scattered across the section reveal in staggered batches as they
//! enter the viewport, tilt toward the pointer while hovered, and carry a
//! glow overlay that fades with hover. No pinning: the section scrolls
//! normally and only observes the offset.

use crate::config::ShowcaseConfig;
use crate::panel::PanelSet;
use crate::reveal::{BatchReveal, BatchRevealConfig};
use crate::tilt::{TiltConfig, TiltController};
use vitrine_animation::{AnimatedTween, Easing, SchedulerHandle};
use vitrine_core::{
    EventType, InputEvent, Rect, TargetId, Viewport, VisualBackend, VisualProp,
};

/// Hover glow fade duration, ms
const GLOW_FADE_MS: f32 = 300.0;

/// Targets the host resolved for one floating card
#[derive(Clone, Copy, Debug, Default)]
pub struct WorksCardTargets {
    /// Outer element: batch-reveal opacity/translate/scale
    pub outer: Option<TargetId>,
    /// Inner element: pointer-tilt rotations
    pub inner: Option<TargetId>,
    /// Glow overlay: hover opacity
    pub glow: Option<TargetId>,
}

struct CardGlow {
    target: Option<TargetId>,
    opacity: AnimatedTween,
}

/// Floating project cards with reveal, tilt, and hover glow
pub struct WorksSection {
    reveal: BatchReveal,
    tilt: TiltController,
    glows: Vec<CardGlow>,
    hovered: Option<usize>,
    breakpoint: f32,
}

impl WorksSection {
    /// Build the section from resolved card targets and measured bounds
    ///
    /// `bounds` pairs with `cards` by index; the card's document-space top
    /// edge drives reveal triggering and its rect drives tilt hit-testing.
    pub fn new(
        panels: &PanelSet,
        config: &ShowcaseConfig,
        handle: SchedulerHandle,
        cards: Vec<WorksCardTargets>,
        bounds: Vec<Rect>,
        viewport: Viewport,
        backend: &mut dyn VisualBackend,
    ) -> Self {
        debug_assert_eq!(cards.len(), bounds.len());
        debug_assert_eq!(cards.len(), panels.len());
        let mut reveal = BatchReveal::new(handle.clone(), BatchRevealConfig::default());
        let mut tilt = TiltController::new(TiltConfig {
            max_degrees: config.tilt_max_degrees,
            response_ms: config.tilt_response_ms,
            recover_ms: config.tilt_recover_ms,
        });
        let mut glows = Vec::new();

        for (idx, (card, rect)) in cards.iter().zip(&bounds).enumerate() {
            reveal.add_card(card.outer, rect.origin.y);
            // Seed by position in the sequence so reloads look the same
            tilt.add_card(card.inner, *rect, idx as u64);
            glows.push(CardGlow {
                target: card.glow,
                opacity: AnimatedTween::new(handle.clone(), 0.0),
            });
        }

        let mut section = Self {
            reveal,
            tilt,
            glows,
            hovered: None,
            breakpoint: config.mobile_breakpoint,
        };
        section
            .tilt
            .set_enabled(!viewport.category_at(section.breakpoint).is_mobile());
        section.reveal.prime(backend);
        section
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn revealed_count(&self) -> usize {
        self.reveal.revealed_count()
    }

    pub fn tilt_enabled(&self) -> bool {
        self.tilt.is_enabled()
    }

    /// Current tilt pair of a card (tests, debug overlays)
    pub fn card_tilt(&self, index: usize) -> Option<crate::tilt::TiltAngles> {
        self.tilt.current(index)
    }

    pub fn card_base_tilt(&self, index: usize) -> Option<crate::tilt::TiltAngles> {
        self.tilt.base(index)
    }

    /// Handle a pointer event from the host
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event.event_type {
            EventType::PointerMove => {
                let over = self.tilt.card_at(event.position);
                if over != self.hovered {
                    if let Some(old) = self.hovered {
                        self.leave_card(old);
                    }
                    if let Some(new) = over {
                        self.enter_card(new);
                    }
                    self.hovered = over;
                }
                if let Some(idx) = over {
                    self.tilt.pointer_move(idx, event.position);
                }
            }
            EventType::PointerLeave => {
                if let Some(old) = self.hovered.take() {
                    self.leave_card(old);
                }
            }
            _ => {}
        }
    }

    /// Observe the page scroll offset for reveal triggering
    pub fn observe_scroll(&mut self, offset: f32, viewport_height: f32) {
        self.reveal.observe_scroll(offset, viewport_height);
    }

    /// React to a viewport change: tilt is desktop-only
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let mobile = viewport.category_at(self.breakpoint).is_mobile();
        self.tilt.set_enabled(!mobile);
        if mobile {
            if let Some(old) = self.hovered.take() {
                self.leave_card(old);
            }
        }
    }

    /// Advance reveal batches, tilt tweens, and glow fades
    pub fn tick(&mut self, dt_ms: f32, backend: &mut dyn VisualBackend) {
        self.reveal.tick(dt_ms, backend);
        self.tilt.tick(dt_ms, backend);
        for glow in &self.glows {
            if let Some(target) = glow.target {
                backend.apply(target, VisualProp::Opacity, glow.opacity.get());
            }
        }
    }

    fn enter_card(&mut self, index: usize) {
        if let Some(glow) = self.glows.get_mut(index) {
            glow.opacity.animate_to(1.0, GLOW_FADE_MS, Easing::EaseOutQuad);
        }
    }

    fn leave_card(&mut self, index: usize) {
        self.tilt.pointer_leave(index);
        if let Some(glow) = self.glows.get_mut(index) {
            glow.opacity.animate_to(0.0, GLOW_FADE_MS, Easing::EaseOutQuad);
        }
    }
}
