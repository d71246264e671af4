//! Panel transition orchestration
//!
//! On every actual index change the orchestrator plays two concurrent
//! sequences: the outgoing panel's exit (reveal masks collapsing top-down,
//! pills fading) and the incoming panel's enter (numeral, then title, then
//! description lines in order, then tag pills — that ordering is the
//! visual hierarchy and is preserved regardless of tuning).
//!
//! Before the enter sequence starts, every piece of the incoming panel is
//! written into its fully hidden state so no unstyled content can flash.
//! Pieces whose targets are absent are skipped; a panel with no resolved
//! targets at all simply has nothing to animate.
//!
//! Starting a new transition while one is running replaces it — dropping
//! the previous sequences deregisters their timelines, which is the
//! cancellation path (no errors, no residual writes).

use crate::config::{EnterSpec, ExitSpec, StageSpec};
use crate::transition::{transition_events, Transition, TransitionPhase};
use smallvec::SmallVec;
use vitrine_animation::{AnimatedTimeline, SchedulerHandle, Timeline, TimelineEntryId};
use vitrine_core::{StateTransitions, TargetId, VisualBackend, VisualProp};

/// Pill scale while hidden, before entering
const PILL_HIDDEN_SCALE: f32 = 0.9;
/// Pill scale at the end of the exit sequence
const PILL_EXIT_SCALE: f32 = 0.95;

/// Resolved content-piece targets for one panel
///
/// Resolution happens once, at construction; `None` marks a piece the
/// host has no element for.
#[derive(Clone, Debug, Default)]
pub struct PanelTargets {
    pub numeral: Option<TargetId>,
    pub title: Option<TargetId>,
    pub lines: SmallVec<[Option<TargetId>; 4]>,
    pub pills: SmallVec<[Option<TargetId>; 4]>,
}

impl PanelTargets {
    /// All present targets, for priming and teardown sweeps
    fn present(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.numeral
            .iter()
            .chain(self.title.iter())
            .chain(self.lines.iter().flatten())
            .chain(self.pills.iter().flatten())
            .copied()
    }
}

/// One timeline plus the property writes it drives
struct ActiveSequence {
    timeline: AnimatedTimeline,
    bindings: Vec<(TimelineEntryId, TargetId, VisualProp)>,
}

impl ActiveSequence {
    fn sample(&self, backend: &mut dyn VisualBackend) {
        for &(entry, target, prop) in &self.bindings {
            if let Some(value) = self.timeline.value(entry) {
                backend.apply(target, prop, value);
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }
}

/// Runs enter/exit sequences for panel transitions
pub struct TimelineOrchestrator {
    handle: SchedulerHandle,
    targets: Vec<PanelTargets>,
    enter_spec: EnterSpec,
    exit_spec: ExitSpec,
    phase: TransitionPhase,
    enter: Option<ActiveSequence>,
    exit: Option<ActiveSequence>,
    transitions_started: u32,
}

impl TimelineOrchestrator {
    pub fn new(
        handle: SchedulerHandle,
        targets: Vec<PanelTargets>,
        enter_spec: EnterSpec,
        exit_spec: ExitSpec,
    ) -> Self {
        Self {
            handle,
            targets,
            enter_spec,
            exit_spec,
            phase: TransitionPhase::Idle,
            enter: None,
            exit: None,
            transitions_started: 0,
        }
    }

    /// Write the initial visual state: `initial` fully visible, every
    /// other panel fully hidden
    pub fn prime(&self, initial: usize, backend: &mut dyn VisualBackend) {
        for (idx, _) in self.targets.iter().enumerate() {
            if idx == initial {
                self.write_visible(idx, backend);
            } else {
                self.write_hidden(idx, backend);
            }
        }
    }

    /// Write every panel fully visible (the stacked mobile fallback has no
    /// per-panel sequencing)
    pub fn reveal_all(&self, backend: &mut dyn VisualBackend) {
        for idx in 0..self.targets.len() {
            self.write_visible(idx, backend);
        }
    }

    /// Play a transition: exit for the outgoing panel (if any) concurrent
    /// with enter for the incoming one
    pub fn begin(&mut self, transition: Transition, backend: &mut dyn VisualBackend) {
        self.transitions_started += 1;
        self.phase.apply(transition_events::BEGIN);

        // Replacing the sequences cancels anything still in flight
        self.exit = transition
            .previous
            .and_then(|prev| self.build_exit(prev));

        // Hidden state lands before the enter timeline's first sample
        self.write_hidden(transition.current, backend);
        self.enter = self.build_enter(transition.current);

        if let Some(seq) = &self.exit {
            seq.timeline.start();
        }
        if let Some(seq) = &self.enter {
            seq.timeline.start();
        }
        tracing::debug!(
            previous = ?transition.previous,
            current = transition.current,
            "panel transition started"
        );
    }

    /// Write the current animation values through the backend
    ///
    /// Also observes completion: when both sequences have run out, the
    /// phase returns to idle (exactly once).
    pub fn sample(&mut self, backend: &mut dyn VisualBackend) {
        if let Some(seq) = &self.exit {
            seq.sample(backend);
        }
        if let Some(seq) = &self.enter {
            seq.sample(backend);
        }

        let done = self.exit.as_ref().map_or(true, ActiveSequence::is_finished)
            && self.enter.as_ref().map_or(true, ActiveSequence::is_finished);
        if self.phase.is_running() && done {
            self.finish();
        }
    }

    /// Complete the current transition, releasing its timelines
    ///
    /// Idempotent: calling again (or with nothing running) is a no-op.
    pub fn finish(&mut self) {
        if self.phase.apply(transition_events::FINISHED) {
            self.enter = None;
            self.exit = None;
        }
    }

    /// Abandon any in-flight sequences without finishing their writes
    pub fn cancel(&mut self) {
        if self.phase.is_running() {
            tracing::debug!("panel transition cancelled");
        }
        self.enter = None;
        self.exit = None;
        self.phase.apply(transition_events::FINISHED);
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Number of transitions started since construction
    pub fn transitions_started(&self) -> u32 {
        self.transitions_started
    }

    pub fn panel_count(&self) -> usize {
        self.targets.len()
    }

    // =========================================================================
    // Sequence construction
    // =========================================================================

    fn build_enter(&self, idx: usize) -> Option<ActiveSequence> {
        let targets = self.targets.get(idx)?;
        let spec = &self.enter_spec;
        let mut timeline = Timeline::new();
        let mut bindings = Vec::new();

        // Numeral, then title: reveal masks opening
        for (target, stage) in [
            (targets.numeral, &spec.numeral),
            (targets.title, &spec.title),
        ] {
            if let Some(target) = target {
                let entry = reveal_entry(&mut timeline, stage, 0, 1.0, 0.0);
                bindings.push((entry, target, VisualProp::ClipTop));
            }
        }

        // Description lines in document order, staggered
        for (i, line) in targets.lines.iter().enumerate() {
            if let Some(target) = line {
                let entry = reveal_entry(&mut timeline, &spec.lines, i, 1.0, 0.0);
                bindings.push((entry, *target, VisualProp::ClipTop));
            }
        }

        // Tag pills last: fade and scale together
        for (j, pill) in targets.pills.iter().enumerate() {
            if let Some(target) = pill {
                let offset = spec.pills.delay_ms + spec.pills.stagger_ms * j as f32;
                let opacity = timeline.add_with_easing(
                    offset,
                    spec.pills.duration_ms,
                    0.0,
                    1.0,
                    spec.pills.easing,
                );
                let scale = timeline.add_with_easing(
                    offset,
                    spec.pills.duration_ms,
                    PILL_HIDDEN_SCALE,
                    1.0,
                    spec.pills.easing,
                );
                bindings.push((opacity, *target, VisualProp::Opacity));
                bindings.push((scale, *target, VisualProp::Scale));
            }
        }

        if bindings.is_empty() {
            return None;
        }
        Some(ActiveSequence {
            timeline: AnimatedTimeline::from_timeline(self.handle.clone(), timeline),
            bindings,
        })
    }

    fn build_exit(&self, idx: usize) -> Option<ActiveSequence> {
        let targets = self.targets.get(idx)?;
        let spec = &self.exit_spec;
        let mut timeline = Timeline::new();
        let mut bindings = Vec::new();

        // Reveal masks collapse top-down
        for (target, stage) in [
            (targets.numeral, &spec.numeral),
            (targets.title, &spec.title),
        ] {
            if let Some(target) = target {
                let entry = reveal_entry(&mut timeline, stage, 0, 0.0, 1.0);
                bindings.push((entry, target, VisualProp::ClipBottom));
            }
        }

        for (i, line) in targets.lines.iter().enumerate() {
            if let Some(target) = line {
                let entry = reveal_entry(&mut timeline, &spec.lines, i, 0.0, 1.0);
                bindings.push((entry, *target, VisualProp::ClipBottom));
            }
        }

        for (j, pill) in targets.pills.iter().enumerate() {
            if let Some(target) = pill {
                let offset = spec.pills.delay_ms + spec.pills.stagger_ms * j as f32;
                let opacity = timeline.add_with_easing(
                    offset,
                    spec.pills.duration_ms,
                    1.0,
                    0.0,
                    spec.pills.easing,
                );
                let scale = timeline.add_with_easing(
                    offset,
                    spec.pills.duration_ms,
                    1.0,
                    PILL_EXIT_SCALE,
                    spec.pills.easing,
                );
                bindings.push((opacity, *target, VisualProp::Opacity));
                bindings.push((scale, *target, VisualProp::Scale));
            }
        }

        if bindings.is_empty() {
            return None;
        }
        Some(ActiveSequence {
            timeline: AnimatedTimeline::from_timeline(self.handle.clone(), timeline),
            bindings,
        })
    }

    // =========================================================================
    // Immediate state writes
    // =========================================================================

    fn write_hidden(&self, idx: usize, backend: &mut dyn VisualBackend) {
        let Some(targets) = self.targets.get(idx) else {
            return;
        };
        for target in targets
            .numeral
            .iter()
            .chain(targets.title.iter())
            .chain(targets.lines.iter().flatten())
        {
            backend.apply(*target, VisualProp::ClipTop, 1.0);
            backend.apply(*target, VisualProp::ClipBottom, 0.0);
        }
        for pill in targets.pills.iter().flatten() {
            backend.apply(*pill, VisualProp::Opacity, 0.0);
            backend.apply(*pill, VisualProp::Scale, PILL_HIDDEN_SCALE);
        }
    }

    fn write_visible(&self, idx: usize, backend: &mut dyn VisualBackend) {
        let Some(targets) = self.targets.get(idx) else {
            return;
        };
        for target in targets.present() {
            backend.apply(target, VisualProp::ClipTop, 0.0);
            backend.apply(target, VisualProp::ClipBottom, 0.0);
        }
        for pill in targets.pills.iter().flatten() {
            backend.apply(*pill, VisualProp::Opacity, 1.0);
            backend.apply(*pill, VisualProp::Scale, 1.0);
        }
    }
}

/// Add one staggered reveal-mask entry
fn reveal_entry(
    timeline: &mut Timeline,
    stage: &StageSpec,
    index: usize,
    from: f32,
    to: f32,
) -> TimelineEntryId {
    timeline.add_with_easing(
        stage.delay_ms + stage.stagger_ms * index as f32,
        stage.duration_ms,
        from,
        to,
        stage.easing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnterSpec, ExitSpec};
    use vitrine_animation::AnimationScheduler;
    use vitrine_core::RecordingBackend;

    fn targets_for(base: u64, lines: usize, pills: usize) -> PanelTargets {
        PanelTargets {
            numeral: Some(TargetId::new(base)),
            title: Some(TargetId::new(base + 1)),
            lines: (0..lines)
                .map(|i| Some(TargetId::new(base + 10 + i as u64)))
                .collect(),
            pills: (0..pills)
                .map(|j| Some(TargetId::new(base + 20 + j as u64)))
                .collect(),
        }
    }

    fn orchestrator(scheduler: &AnimationScheduler) -> TimelineOrchestrator {
        TimelineOrchestrator::new(
            scheduler.handle(),
            vec![targets_for(100, 3, 2), targets_for(200, 2, 3)],
            EnterSpec::default(),
            ExitSpec::default(),
        )
    }

    fn run(scheduler: &AnimationScheduler, orch: &mut TimelineOrchestrator, backend: &mut RecordingBackend, frames: usize) {
        for _ in 0..frames {
            scheduler.tick(16.0);
            orch.sample(backend);
        }
    }

    #[test]
    fn prime_hides_inactive_panels() {
        let scheduler = AnimationScheduler::new();
        let orch = orchestrator(&scheduler);
        let mut backend = RecordingBackend::new();
        orch.prime(0, &mut backend);

        // Active panel visible
        assert_eq!(
            backend.last(TargetId::new(100), VisualProp::ClipTop),
            Some(0.0)
        );
        assert_eq!(
            backend.last(TargetId::new(120), VisualProp::Opacity),
            Some(1.0)
        );
        // Other panel hidden
        assert_eq!(
            backend.last(TargetId::new(200), VisualProp::ClipTop),
            Some(1.0)
        );
        assert_eq!(
            backend.last(TargetId::new(220), VisualProp::Opacity),
            Some(0.0)
        );
    }

    #[test]
    fn incoming_panel_is_hidden_before_entering() {
        let scheduler = AnimationScheduler::new();
        let mut orch = orchestrator(&scheduler);
        let mut backend = RecordingBackend::new();

        orch.begin(
            Transition {
                previous: Some(0),
                current: 1,
            },
            &mut backend,
        );

        // Immediately after begin, before any sampling, panel 1 is hidden
        assert_eq!(
            backend.last(TargetId::new(200), VisualProp::ClipTop),
            Some(1.0)
        );
        assert_eq!(
            backend.last(TargetId::new(220), VisualProp::Scale),
            Some(0.9)
        );
        assert!(orch.is_running());
    }

    #[test]
    fn stage_order_numeral_title_lines_pills() {
        let scheduler = AnimationScheduler::new();
        let mut orch = orchestrator(&scheduler);
        let mut backend = RecordingBackend::new();

        orch.begin(
            Transition {
                previous: None,
                current: 1,
            },
            &mut backend,
        );

        // 800ms in: numeral moving, pills untouched by the enter curve
        run(&scheduler, &mut orch, &mut backend, 50);
        let numeral = backend.last(TargetId::new(200), VisualProp::ClipTop).unwrap();
        let title = backend.last(TargetId::new(201), VisualProp::ClipTop).unwrap();
        let pill = backend.last(TargetId::new(220), VisualProp::Opacity).unwrap();
        assert!(numeral < 1.0, "numeral reveal underway");
        assert!(numeral <= title, "numeral leads title");
        assert_eq!(pill, 0.0, "pills wait for their stage");

        // Run to completion: everything fully visible
        run(&scheduler, &mut orch, &mut backend, 200);
        assert_eq!(
            backend.last(TargetId::new(200), VisualProp::ClipTop),
            Some(0.0)
        );
        assert_eq!(
            backend.last(TargetId::new(220), VisualProp::Opacity),
            Some(1.0)
        );
        assert_eq!(
            backend.last(TargetId::new(220), VisualProp::Scale),
            Some(1.0)
        );
        assert!(!orch.is_running());
    }

    #[test]
    fn exit_collapses_previous_panel() {
        let scheduler = AnimationScheduler::new();
        let mut orch = orchestrator(&scheduler);
        let mut backend = RecordingBackend::new();

        orch.prime(0, &mut backend);
        orch.begin(
            Transition {
                previous: Some(0),
                current: 1,
            },
            &mut backend,
        );
        run(&scheduler, &mut orch, &mut backend, 250);

        assert_eq!(
            backend.last(TargetId::new(100), VisualProp::ClipBottom),
            Some(1.0)
        );
        assert_eq!(
            backend.last(TargetId::new(120), VisualProp::Opacity),
            Some(0.0)
        );
        assert_eq!(
            backend.last(TargetId::new(120), VisualProp::Scale),
            Some(0.95)
        );
    }

    #[test]
    fn missing_targets_are_skipped_silently() {
        let scheduler = AnimationScheduler::new();
        let mut sparse = targets_for(300, 2, 1);
        sparse.title = None;
        sparse.lines[1] = None;

        let mut orch = TimelineOrchestrator::new(
            scheduler.handle(),
            vec![PanelTargets::default(), sparse],
            EnterSpec::default(),
            ExitSpec::default(),
        );
        let mut backend = RecordingBackend::new();

        // Previous panel has no targets at all; current is missing pieces
        orch.begin(
            Transition {
                previous: Some(0),
                current: 1,
            },
            &mut backend,
        );
        run(&scheduler, &mut orch, &mut backend, 250);

        assert_eq!(
            backend.last(TargetId::new(300), VisualProp::ClipTop),
            Some(0.0)
        );
        assert_eq!(backend.last(TargetId::new(301), VisualProp::ClipTop), None);
        assert!(!orch.is_running());
    }

    #[test]
    fn finish_is_idempotent() {
        let scheduler = AnimationScheduler::new();
        let mut orch = orchestrator(&scheduler);
        let mut backend = RecordingBackend::new();

        orch.begin(
            Transition {
                previous: None,
                current: 1,
            },
            &mut backend,
        );
        orch.finish();
        assert!(!orch.is_running());
        orch.finish();
        assert!(!orch.is_running());
        assert_eq!(scheduler.timeline_count(), 0);
    }

    #[test]
    fn cancel_mid_flight_releases_timelines() {
        let scheduler = AnimationScheduler::new();
        let mut orch = orchestrator(&scheduler);
        let mut backend = RecordingBackend::new();

        orch.begin(
            Transition {
                previous: Some(0),
                current: 1,
            },
            &mut backend,
        );
        run(&scheduler, &mut orch, &mut backend, 10);
        assert!(scheduler.timeline_count() > 0);

        orch.cancel();
        assert!(!orch.is_running());
        assert_eq!(scheduler.timeline_count(), 0);

        // Sampling after cancel writes nothing new
        let writes = backend.write_count();
        orch.sample(&mut backend);
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn new_transition_replaces_running_one() {
        let scheduler = AnimationScheduler::new();
        let mut orch = orchestrator(&scheduler);
        let mut backend = RecordingBackend::new();

        orch.begin(
            Transition {
                previous: Some(0),
                current: 1,
            },
            &mut backend,
        );
        run(&scheduler, &mut orch, &mut backend, 5);

        orch.begin(
            Transition {
                previous: Some(1),
                current: 0,
            },
            &mut backend,
        );
        // Old timelines dropped, only the replacement pair remains
        assert!(scheduler.timeline_count() <= 2);
        assert_eq!(orch.transitions_started(), 2);

        run(&scheduler, &mut orch, &mut backend, 250);
        assert_eq!(
            backend.last(TargetId::new(100), VisualProp::ClipTop),
            Some(0.0)
        );
    }
}
