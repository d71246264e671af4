//! The pinned skills section
//!
//! Pins under [`SKILLS_PIN_ID`], maps scroll progress to an active panel,
//! and plays enter/exit sequences on every change. Scroll-end input snaps
//! to the nearest panel; arrow keys step to the adjacent one — both land
//! on the same `k / (count − 1)` progress grid with the same easing.

use crate::config::ShowcaseConfig;
use crate::index::IndexMapper;
use crate::indicator::ProgressIndicator;
use crate::orchestrator::{PanelTargets, TimelineOrchestrator};
use crate::panel::PanelSet;
use crate::sections::{InputMode, SectionLayout};
use crate::transition::TransitionState;
use vitrine_animation::{Easing, SchedulerHandle};
use vitrine_core::{EventType, InputEvent, KeyCode, TargetId, VisualBackend};
use vitrine_scroll::{ExtentPolicy, Pin, PinnedTracker, ScrollContext};

/// Pin registry identifier for this section
pub const SKILLS_PIN_ID: &str = "horizontal-gallery";

/// Targets the host resolved for this section's elements
pub struct SkillsTargets {
    pub panels: Vec<PanelTargets>,
    pub indicator_fill: Option<TargetId>,
    pub indicator_dots: Vec<Option<TargetId>>,
}

/// Scroll-pinned panel showcase with keyboard navigation and snapping
pub struct SkillsSection {
    panels: PanelSet,
    config: ShowcaseConfig,
    layout: SectionLayout,
    mapper: IndexMapper,
    transition: TransitionState,
    orchestrator: TimelineOrchestrator,
    indicator: ProgressIndicator,
    mode: InputMode,
    keyboard_bound: bool,
    progress: f32,
}

impl SkillsSection {
    /// Build the section and mount the bindings for the current viewport
    pub fn new(
        panels: PanelSet,
        config: ShowcaseConfig,
        handle: SchedulerHandle,
        targets: SkillsTargets,
        layout: SectionLayout,
        scroll: &mut ScrollContext,
        backend: &mut dyn VisualBackend,
    ) -> Self {
        let mapper = IndexMapper::new(panels.len());
        let orchestrator = TimelineOrchestrator::new(
            handle.clone(),
            targets.panels,
            config.enter,
            config.exit,
        );
        let indicator = ProgressIndicator::new(
            handle,
            targets.indicator_fill,
            targets.indicator_dots,
            config.indicator_smoothing_ms,
        );

        let mut section = Self {
            panels,
            config,
            layout,
            mapper,
            transition: TransitionState::new(),
            orchestrator,
            indicator,
            mode: InputMode::Mobile,
            keyboard_bound: false,
            progress: 0.0,
        };

        if scroll.viewport().category_at(section.config.mobile_breakpoint).is_mobile() {
            section.mount_mobile(backend);
        } else {
            section.mount_desktop(scroll, backend);
        }
        section
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn active_index(&self) -> usize {
        self.transition.current()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn keyboard_bound(&self) -> bool {
        self.keyboard_bound
    }

    pub fn is_transition_running(&self) -> bool {
        self.orchestrator.is_running()
    }

    /// Transitions played since construction
    pub fn transitions_started(&self) -> u32 {
        self.orchestrator.transitions_started()
    }

    /// Smoothed indicator fill currently displayed
    pub fn indicator_fill(&self) -> f32 {
        self.indicator.fill_value()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn mount_desktop(&mut self, scroll: &mut ScrollContext, backend: &mut dyn VisualBackend) {
        let mut tracker = PinnedTracker::new(ExtentPolicy::TrackOrViewport { factor: 2.0 });
        tracker.set_pin_start(self.layout.pin_start);
        scroll.register_pin(SKILLS_PIN_ID, Pin::new(tracker, self.layout.track_size));

        self.keyboard_bound = true;
        self.mode = InputMode::Desktop;
        self.orchestrator.prime(self.transition.current(), backend);
    }

    fn mount_mobile(&mut self, backend: &mut dyn VisualBackend) {
        self.mode = InputMode::Mobile;
        self.orchestrator.reveal_all(backend);
    }

    /// Release every desktop binding owned by this section
    ///
    /// In-flight transitions are cancelled, the pin is unregistered, and
    /// the key handler goes away. The section stops driving visuals until
    /// a later `set_viewport` remounts it. Safe to call repeatedly.
    pub fn teardown(&mut self, scroll: &mut ScrollContext) {
        scroll.unregister_pin(SKILLS_PIN_ID);
        self.keyboard_bound = false;
        self.mode = InputMode::Mobile;
        self.orchestrator.cancel();
    }

    /// React to a viewport change already applied to the scroll context
    ///
    /// Crossing the breakpoint swaps input modes; desktop bindings come
    /// down before the mobile presentation goes up, never both live.
    pub fn set_viewport(&mut self, scroll: &mut ScrollContext, backend: &mut dyn VisualBackend) {
        let mobile = scroll
            .viewport()
            .category_at(self.config.mobile_breakpoint)
            .is_mobile();
        match (self.mode, mobile) {
            (InputMode::Desktop, true) => {
                self.teardown(scroll);
                self.mount_mobile(backend);
            }
            (InputMode::Mobile, false) => {
                self.mount_desktop(scroll, backend);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a host input event
    pub fn handle_event(&mut self, event: &InputEvent, scroll: &mut ScrollContext) {
        if self.mode != InputMode::Desktop {
            return;
        }
        match event.event_type {
            EventType::KeyDown if self.keyboard_bound => {
                let direction = match event.key {
                    Some(KeyCode::ArrowRight) => 1,
                    Some(KeyCode::ArrowLeft) => -1,
                    _ => return,
                };
                if self.mapper.steps() == 0 {
                    return;
                }
                let target = self.mapper.step_target(self.transition.current(), direction);
                self.ease_to_progress(target, scroll);
            }
            EventType::ScrollEnd => {
                let target = self.mapper.snap_target(self.progress);
                if (target - self.progress).abs() > f32::EPSILON {
                    self.ease_to_progress(target, scroll);
                }
            }
            _ => {}
        }
    }

    fn ease_to_progress(&self, target: f32, scroll: &mut ScrollContext) {
        let Some(pin) = scroll.pin(SKILLS_PIN_ID) else {
            return;
        };
        let offset = pin.tracker().offset_for_progress(target);
        scroll.scroll_to(offset, self.config.snap_duration_ms, Easing::EaseOutQuad);
    }

    // =========================================================================
    // Frame update
    // =========================================================================

    /// Pull progress from the scroll context and drive the visuals
    ///
    /// Call after the scroll context and scheduler have ticked this frame.
    pub fn update(&mut self, scroll: &ScrollContext, backend: &mut dyn VisualBackend) {
        if self.mode != InputMode::Desktop {
            return;
        }
        if let Some(progress) = scroll.pin_progress(SKILLS_PIN_ID) {
            self.progress = progress;
        }

        let index = self.mapper.index_for(self.progress);
        if let Some(transition) = self.transition.advance(index) {
            self.orchestrator.begin(transition, backend);
            self.indicator.pulse(index);
        }

        self.indicator.set_progress(self.progress);
        self.orchestrator.sample(backend);
        self.indicator.sample(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::PanelTargets;
    use crate::panel::PanelItem;
    use vitrine_animation::AnimationScheduler;
    use vitrine_core::{RecordingBackend, Viewport};
    use vitrine_scroll::SmoothScrollConfig;

    fn three_panels() -> PanelSet {
        PanelSet::new(vec![
            PanelItem::new("01", "Full-Stack Development", "complete web solutions"),
            PanelItem::new("02", "Frontend", "clean responsive interfaces"),
            PanelItem::new("03", "DevOps & Deployment", "reliable deployments"),
        ])
    }

    fn targets() -> SkillsTargets {
        SkillsTargets {
            panels: (0..3)
                .map(|i| PanelTargets {
                    numeral: Some(TargetId::new(100 * (i + 1))),
                    title: Some(TargetId::new(100 * (i + 1) + 1)),
                    lines: (0..2).map(|l| Some(TargetId::new(100 * (i + 1) + 10 + l))).collect(),
                    pills: (0..2).map(|p| Some(TargetId::new(100 * (i + 1) + 20 + p))).collect(),
                })
                .collect(),
            indicator_fill: Some(TargetId::new(900)),
            indicator_dots: vec![
                Some(TargetId::new(901)),
                Some(TargetId::new(902)),
                Some(TargetId::new(903)),
            ],
        }
    }

    fn desktop_scroll() -> ScrollContext {
        let mut ctx = ScrollContext::new(
            SmoothScrollConfig::default(),
            Viewport::new(1280.0, 800.0),
        );
        ctx.set_content_limit(10_000.0);
        ctx
    }

    fn section(scroll: &mut ScrollContext, scheduler: &AnimationScheduler, backend: &mut RecordingBackend) -> SkillsSection {
        SkillsSection::new(
            three_panels(),
            ShowcaseConfig::default(),
            scheduler.handle(),
            targets(),
            SectionLayout {
                pin_start: 0.0,
                track_size: 2560.0,
            },
            scroll,
            backend,
        )
    }

    /// Drive progress directly through the pin and let the section observe it
    fn force_progress(scroll: &mut ScrollContext, p: f32) {
        let offset = scroll
            .pin(SKILLS_PIN_ID)
            .unwrap()
            .tracker()
            .offset_for_progress(p);
        scroll.scroll_to(offset, 0.0, Easing::Linear);
        scroll.tick(0.0);
    }

    #[test]
    fn progress_sequence_drives_two_transitions() {
        let scheduler = AnimationScheduler::new();
        let mut backend = RecordingBackend::new();
        let mut scroll = desktop_scroll();
        let mut section = section(&mut scroll, &scheduler, &mut backend);

        let mut indices = Vec::new();
        for p in [0.0, 0.2, 0.6, 1.0] {
            force_progress(&mut scroll, p);
            section.update(&scroll, &mut backend);
            indices.push(section.active_index());
            scheduler.tick(16.0);
        }

        assert_eq!(indices, vec![0, 0, 1, 2]);
        assert_eq!(section.transitions_started(), 2);
    }

    #[test]
    fn repeated_index_is_single_invocation() {
        let scheduler = AnimationScheduler::new();
        let mut backend = RecordingBackend::new();
        let mut scroll = desktop_scroll();
        let mut section = section(&mut scroll, &scheduler, &mut backend);

        force_progress(&mut scroll, 0.6);
        section.update(&scroll, &mut backend);
        section.update(&scroll, &mut backend);
        section.update(&scroll, &mut backend);
        assert_eq!(section.transitions_started(), 1);
    }

    #[test]
    fn snap_settles_on_nearest_panel() {
        let scheduler = AnimationScheduler::new();
        let mut backend = RecordingBackend::new();
        let mut scroll = desktop_scroll();
        let mut section = section(&mut scroll, &scheduler, &mut backend);

        force_progress(&mut scroll, 0.42);
        section.update(&scroll, &mut backend);

        section.handle_event(&InputEvent::new(EventType::ScrollEnd), &mut scroll);
        // Let the snap animation run out
        for _ in 0..120 {
            scroll.tick(16.0);
            scheduler.tick(16.0);
            section.update(&scroll, &mut backend);
        }
        assert!((section.progress() - 0.5).abs() < 1e-3);
        assert_eq!(section.active_index(), 1);
    }

    #[test]
    fn arrow_keys_step_between_panels() {
        let scheduler = AnimationScheduler::new();
        let mut backend = RecordingBackend::new();
        let mut scroll = desktop_scroll();
        let mut section = section(&mut scroll, &scheduler, &mut backend);

        section.handle_event(&InputEvent::key_down(KeyCode::ArrowRight), &mut scroll);
        for _ in 0..120 {
            scroll.tick(16.0);
            scheduler.tick(16.0);
            section.update(&scroll, &mut backend);
        }
        assert_eq!(section.active_index(), 1);
        assert!((section.progress() - 0.5).abs() < 1e-3);

        section.handle_event(&InputEvent::key_down(KeyCode::ArrowLeft), &mut scroll);
        for _ in 0..120 {
            scroll.tick(16.0);
            scheduler.tick(16.0);
            section.update(&scroll, &mut backend);
        }
        assert_eq!(section.active_index(), 0);
        assert!(section.progress() < 1e-3);
    }

    #[test]
    fn teardown_releases_pin_and_keys() {
        let scheduler = AnimationScheduler::new();
        let mut backend = RecordingBackend::new();
        let mut scroll = desktop_scroll();
        let mut section = section(&mut scroll, &scheduler, &mut backend);
        assert_eq!(scroll.pin_count(), 1);
        assert!(section.keyboard_bound());

        section.teardown(&mut scroll);
        assert_eq!(scroll.pin_count(), 0);
        assert!(!section.keyboard_bound());

        // Idempotent
        section.teardown(&mut scroll);
        assert_eq!(scroll.pin_count(), 0);
    }

    #[test]
    fn breakpoint_crossing_swaps_modes_exclusively() {
        let scheduler = AnimationScheduler::new();
        let mut backend = RecordingBackend::new();
        let mut scroll = desktop_scroll();
        let mut section = section(&mut scroll, &scheduler, &mut backend);

        // Start a transition, then shrink mid-flight
        force_progress(&mut scroll, 0.6);
        section.update(&scroll, &mut backend);
        assert!(section.is_transition_running());

        scroll.set_viewport(Viewport::new(600.0, 900.0));
        section.set_viewport(&mut scroll, &mut backend);

        assert_eq!(section.input_mode(), InputMode::Mobile);
        assert!(!section.keyboard_bound());
        assert_eq!(scroll.pin_count(), 0);
        assert!(!section.is_transition_running());

        // Mobile fallback shows everything
        assert_eq!(
            backend.last(TargetId::new(300), vitrine_core::VisualProp::ClipTop),
            Some(0.0)
        );

        // Key events are ignored in mobile mode
        section.handle_event(&InputEvent::key_down(KeyCode::ArrowRight), &mut scroll);
        assert_eq!(section.active_index(), 1);

        // Grow back: desktop bindings return, exactly one mode active
        scroll.set_viewport(Viewport::new(1400.0, 900.0));
        section.set_viewport(&mut scroll, &mut backend);
        assert_eq!(section.input_mode(), InputMode::Desktop);
        assert!(section.keyboard_bound());
        assert_eq!(scroll.pin_count(), 1);
    }
}
