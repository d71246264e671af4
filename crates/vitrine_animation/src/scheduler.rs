//! Animation scheduler
//!
//! Owns every active animation and advances them when the host calls
//! [`AnimationScheduler::tick`] once per frame. Animations register
//! implicitly through wrapper types:
//!
//! - [`AnimatedTween`] - retargetable single-value animation
//! - [`AnimatedTimeline`] - offset-orchestrated entry set
//!
//! Wrappers hold a weak [`SchedulerHandle`] and deregister on drop, so a
//! torn-down component cannot leave animations running. Retargeting an
//! [`AnimatedTween`] replaces the registered tween outright: the most
//! recent input always wins, there is no queue.
//!
//! The scheduler is owned by whoever creates it (typically a scroll
//! context or a section). There is no process-wide instance.

use crate::easing::Easing;
use crate::timeline::Timeline;
use crate::tween::Tween;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, Weak};

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
    /// Handle to a registered timeline
    pub struct TimelineId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, Tween>,
    timelines: SlotMap<TimelineId, Timeline>,
}

/// The scheduler that ticks all active animations
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                timelines: SlotMap::with_key(),
            })),
        }
    }

    /// Get a weak handle for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance all animations by `dt_ms`
    ///
    /// Returns true if any animation is still playing (needs another tick).
    /// Finished animations stay registered until their wrapper drops, so
    /// their final values remain readable.
    pub fn tick(&self, dt_ms: f32) -> bool {
        let mut inner = self.inner.lock().unwrap();

        for (_, tween) in inner.tweens.iter_mut() {
            tween.tick(dt_ms);
        }
        for (_, timeline) in inner.timelines.iter_mut() {
            timeline.tick(dt_ms);
        }

        inner.tweens.iter().any(|(_, t)| t.is_playing())
            || inner.timelines.iter().any(|(_, t)| t.is_playing())
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.tweens.iter().any(|(_, t)| t.is_playing())
            || inner.timelines.iter().any(|(_, t)| t.is_playing())
    }

    /// Number of registered tweens
    pub fn tween_count(&self) -> usize {
        self.inner.lock().unwrap().tweens.len()
    }

    /// Number of registered timelines
    pub fn timeline_count(&self) -> usize {
        self.inner.lock().unwrap().timelines.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AnimationScheduler {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// A weak handle to the animation scheduler
///
/// Components hold this instead of the scheduler itself; every operation
/// is a no-op returning `None`/default once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    // =========================================================================
    // Tween Operations
    // =========================================================================

    /// Register a tween and return its id
    pub fn register_tween(&self, tween: Tween) -> Option<TweenId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().tweens.insert(tween))
    }

    /// Replace a registered tween in place, cancelling the previous one
    pub fn replace_tween(&self, id: TweenId, tween: Tween) -> bool {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(slot) = inner.lock().unwrap().tweens.get_mut(id) {
                *slot = tween;
                return true;
            }
        }
        false
    }

    /// Current tween value
    pub fn tween_value(&self, id: TweenId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().tweens.get(id).map(|t| t.value()))
    }

    /// Whether the tween is still playing
    pub fn is_tween_playing(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().tweens.get(id).map(|t| t.is_playing()))
            .unwrap_or(false)
    }

    /// Apply a function to a tween if it exists
    pub fn with_tween<F, R>(&self, id: TweenId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Tween) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().tweens.get_mut(id).map(f))
    }

    /// Remove a tween
    pub fn remove_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().tweens.remove(id);
        }
    }

    // =========================================================================
    // Timeline Operations
    // =========================================================================

    /// Register a timeline and return its id
    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().timelines.insert(timeline))
    }

    /// Whether the timeline is still playing
    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .timelines
                    .get(id)
                    .map(|t| t.is_playing())
            })
            .unwrap_or(false)
    }

    /// Apply a function to a timeline if it exists
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().timelines.get_mut(id).map(f))
    }

    /// Remove a timeline
    pub fn remove_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().timelines.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Tween
// ============================================================================

/// A retargetable animated value that registers with the scheduler
///
/// `animate_to` replaces whatever tween is currently registered for this
/// value; the replacement starts from the current in-flight value so
/// motion never jumps.
pub struct AnimatedTween {
    handle: SchedulerHandle,
    id: Option<TweenId>,
    /// Resting value while no tween is registered
    current: f32,
}

impl AnimatedTween {
    pub fn new(handle: SchedulerHandle, initial: f32) -> Self {
        Self {
            handle,
            id: None,
            current: initial,
        }
    }

    /// Animate from the current value toward `target`
    pub fn animate_to(&mut self, target: f32, duration_ms: f32, easing: Easing) {
        let from = self.get();
        let mut tween = Tween::new(from, target, duration_ms).easing(easing);
        tween.start();
        self.play(tween);
    }

    /// Register an arbitrary tween (pulses, delays), replacing the current one
    pub fn play(&mut self, tween: Tween) {
        self.current = self.get();
        match self.id {
            Some(id) => {
                if !self.handle.replace_tween(id, tween) {
                    self.id = None;
                }
            }
            None => {
                self.id = self.handle.register_tween(tween);
                if self.id.is_none() {
                    tracing::debug!("animation scheduler dropped; tween not registered");
                }
            }
        }
    }

    /// Get the current animated value
    pub fn get(&self) -> f32 {
        match self.id {
            Some(id) => self.handle.tween_value(id).unwrap_or(self.current),
            None => self.current,
        }
    }

    /// Set the value immediately without animation
    pub fn set_immediate(&mut self, value: f32) {
        if let Some(id) = self.id.take() {
            self.handle.remove_tween(id);
        }
        self.current = value;
    }

    /// The value the tween is heading toward (or resting at)
    pub fn target(&self) -> f32 {
        match self.id {
            Some(id) => self
                .handle
                .with_tween(id, |t| t.target())
                .unwrap_or(self.current),
            None => self.current,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.id.is_some_and(|id| self.handle.is_tween_playing(id))
    }
}

impl Drop for AnimatedTween {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_tween(id);
        }
    }
}

// ============================================================================
// Animated Timeline
// ============================================================================

/// A timeline that registers with the scheduler
pub struct AnimatedTimeline {
    handle: SchedulerHandle,
    id: Option<TimelineId>,
}

impl AnimatedTimeline {
    /// Register an empty timeline
    pub fn new(handle: SchedulerHandle) -> Self {
        let id = handle.register_timeline(Timeline::new());
        Self { handle, id }
    }

    /// Register a pre-built timeline
    pub fn from_timeline(handle: SchedulerHandle, timeline: Timeline) -> Self {
        let id = handle.register_timeline(timeline);
        Self { handle, id }
    }

    /// Access the underlying timeline
    pub fn with<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.id.and_then(|id| self.handle.with_timeline(id, f))
    }

    /// Start (or restart) the timeline from the beginning
    pub fn start(&self) {
        self.with(|t| t.start());
    }

    /// Stop the timeline where it is
    pub fn stop(&self) {
        self.with(|t| t.stop());
    }

    /// Current value of an entry
    pub fn value(&self, entry: crate::timeline::TimelineEntryId) -> Option<f32> {
        self.with(|t| t.value(entry)).flatten()
    }

    pub fn is_playing(&self) -> bool {
        self.id.is_some_and(|id| self.handle.is_timeline_playing(id))
    }

    pub fn is_finished(&self) -> bool {
        self.with(|t| t.is_finished()).unwrap_or(true)
    }

    /// Overall progress, 0..=1
    pub fn progress(&self) -> f32 {
        self.with(|t| t.progress()).unwrap_or(1.0)
    }
}

impl Drop for AnimatedTimeline {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_timeline(id);
        }
    }
}
