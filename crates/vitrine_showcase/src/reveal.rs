//! Viewport-entry batch reveal
//!
//! Floating cards start hidden (transparent, shifted down, slightly
//! shrunk). As the page scrolls, cards whose top edge crosses the trigger
//! line — a fraction of the viewport height — are collected and flushed
//! in batches: at most `batch_max` per flush, one flush per collection
//! interval, each batch staggering its members. A revealed card stays
//! revealed when scrolled back out.

use smallvec::SmallVec;
use vitrine_animation::{AnimatedTimeline, SchedulerHandle, Timeline, TimelineEntryId};
use vitrine_core::{TargetId, VisualBackend, VisualProp};

/// Hidden-state offsets a card enters from
const HIDDEN_TRANSLATE_Y: f32 = 80.0;
const HIDDEN_SCALE: f32 = 0.95;

/// Batch reveal tuning
#[derive(Clone, Copy, Debug)]
pub struct BatchRevealConfig {
    /// Fraction of viewport height where the trigger line sits
    pub trigger_fraction: f32,
    /// Maximum cards animated per flush
    pub batch_max: usize,
    /// Collection window between flushes, ms
    pub interval_ms: f32,
    /// Per-card stagger within a batch, ms
    pub stagger_ms: f32,
    pub duration_ms: f32,
}

impl Default for BatchRevealConfig {
    fn default() -> Self {
        Self {
            trigger_fraction: 0.85,
            batch_max: 4,
            interval_ms: 100.0,
            stagger_ms: 60.0,
            duration_ms: 800.0,
        }
    }
}

struct RevealCard {
    target: Option<TargetId>,
    /// Document-space y of the card's top edge
    top: f32,
    revealed: bool,
}

struct ActiveBatch {
    timeline: AnimatedTimeline,
    bindings: SmallVec<[(TimelineEntryId, TargetId, VisualProp); 12]>,
}

/// Reveals cards in staggered batches as they enter the viewport
pub struct BatchReveal {
    handle: SchedulerHandle,
    config: BatchRevealConfig,
    cards: Vec<RevealCard>,
    /// Cards waiting for the next flush
    pending: Vec<usize>,
    interval_left_ms: f32,
    batches: Vec<ActiveBatch>,
}

impl BatchReveal {
    pub fn new(handle: SchedulerHandle, config: BatchRevealConfig) -> Self {
        Self {
            handle,
            config,
            cards: Vec::new(),
            pending: Vec::new(),
            interval_left_ms: 0.0,
            batches: Vec::new(),
        }
    }

    /// Add a card; returns its index
    pub fn add_card(&mut self, target: Option<TargetId>, document_top: f32) -> usize {
        self.cards.push(RevealCard {
            target,
            top: document_top,
            revealed: false,
        });
        self.cards.len() - 1
    }

    /// Write the hidden state for every unrevealed card
    pub fn prime(&self, backend: &mut dyn VisualBackend) {
        for card in &self.cards {
            if card.revealed {
                continue;
            }
            if let Some(target) = card.target {
                backend.apply(target, VisualProp::Opacity, 0.0);
                backend.apply(target, VisualProp::TranslateY, HIDDEN_TRANSLATE_Y);
                backend.apply(target, VisualProp::Scale, HIDDEN_SCALE);
            }
        }
    }

    /// Collect cards whose top edge has crossed the trigger line
    pub fn observe_scroll(&mut self, offset: f32, viewport_height: f32) {
        let trigger_line = offset + viewport_height * self.config.trigger_fraction;
        for (idx, card) in self.cards.iter().enumerate() {
            if card.revealed || self.pending.contains(&idx) {
                continue;
            }
            if card.top <= trigger_line {
                self.pending.push(idx);
            }
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.cards.iter().filter(|c| c.revealed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance the collection window and active batches
    pub fn tick(&mut self, dt_ms: f32, backend: &mut dyn VisualBackend) {
        if !self.pending.is_empty() {
            self.interval_left_ms -= dt_ms;
            if self.interval_left_ms <= 0.0 {
                self.flush();
                self.interval_left_ms = self.config.interval_ms;
            }
        }

        for batch in &self.batches {
            for &(entry, target, prop) in &batch.bindings {
                if let Some(value) = batch.timeline.value(entry) {
                    backend.apply(target, prop, value);
                }
            }
        }
        self.batches.retain(|b| !b.timeline.is_finished());
    }

    /// Animate the next batch of pending cards
    fn flush(&mut self) {
        let count = self.pending.len().min(self.config.batch_max);
        if count == 0 {
            return;
        }
        let flushed: Vec<usize> = self.pending.drain(..count).collect();

        let mut timeline = Timeline::new();
        let mut bindings = SmallVec::new();
        for (slot, &card_idx) in flushed.iter().enumerate() {
            let card = &mut self.cards[card_idx];
            card.revealed = true;
            let Some(target) = card.target else {
                continue;
            };
            let offset = self.config.stagger_ms * slot as f32;
            for (prop, from, to) in [
                (VisualProp::Opacity, 0.0, 1.0),
                (VisualProp::TranslateY, HIDDEN_TRANSLATE_Y, 0.0),
                (VisualProp::Scale, HIDDEN_SCALE, 1.0),
            ] {
                let entry = timeline.add_with_easing(
                    offset,
                    self.config.duration_ms,
                    from,
                    to,
                    vitrine_animation::Easing::EaseOutCubic,
                );
                bindings.push((entry, target, prop));
            }
        }

        if bindings.is_empty() {
            return;
        }
        let animated = AnimatedTimeline::from_timeline(self.handle.clone(), timeline);
        animated.start();
        self.batches.push(ActiveBatch {
            timeline: animated,
            bindings,
        });
        tracing::debug!(cards = flushed.len(), "reveal batch flushed");
    }
}
