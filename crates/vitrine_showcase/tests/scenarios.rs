//! End-to-end scenarios across the scroll context, scheduler, and sections

use vitrine_animation::{AnimationScheduler, Easing};
use vitrine_core::{
    EventType, InputEvent, KeyCode, RecordingBackend, TargetId, Viewport, VisualProp,
};
use vitrine_scroll::{ScrollContext, SmoothScrollConfig};
use vitrine_showcase::{
    InputMode, PanelItem, PanelSet, PanelTargets, SectionLayout, ShowcaseConfig, SkillsSection,
    SkillsTargets, SKILLS_PIN_ID,
};

fn panels() -> PanelSet {
    PanelSet::new(vec![
        PanelItem::new(
            "01",
            "Full-Stack Development",
            "From frontend interactions to backend APIs, I build complete web solutions \
             ready for real-world users.",
        )
        .tags(["React, Node.js, Express.js", "REST APIs, Firebase, Docker"]),
        PanelItem::new(
            "02",
            "Frontend",
            "Clean, responsive interfaces that feel intuitive across devices.",
        )
        .tags(["Next.js, GSAP", "Figma to Code"]),
        PanelItem::new(
            "03",
            "DevOps & Deployment",
            "CI/CD pipelines, containerized applications, and cloud infrastructure.",
        )
        .tags(["Docker", "CI/CD Pipelines", "Cloud Platforms"]),
    ])
}

fn panel_targets(set: &PanelSet) -> Vec<PanelTargets> {
    set.iter()
        .enumerate()
        .map(|(i, panel)| {
            let base = 1000 * (i as u64 + 1);
            PanelTargets {
                numeral: Some(TargetId::new(base)),
                title: Some(TargetId::new(base + 1)),
                lines: (0..panel.desc_lines().len())
                    .map(|l| Some(TargetId::new(base + 10 + l as u64)))
                    .collect(),
                pills: (0..panel.tags.len())
                    .map(|p| Some(TargetId::new(base + 50 + p as u64)))
                    .collect(),
            }
        })
        .collect()
}

struct Harness {
    scheduler: AnimationScheduler,
    scroll: ScrollContext,
    section: SkillsSection,
    backend: RecordingBackend,
}

impl Harness {
    fn new(viewport: Viewport) -> Self {
        let scheduler = AnimationScheduler::new();
        let mut scroll = ScrollContext::new(SmoothScrollConfig::default(), viewport);
        scroll.set_content_limit(10_000.0);
        let mut backend = RecordingBackend::new();

        let set = panels();
        let targets = SkillsTargets {
            panels: panel_targets(&set),
            indicator_fill: Some(TargetId::new(9000)),
            indicator_dots: vec![
                Some(TargetId::new(9001)),
                Some(TargetId::new(9002)),
                Some(TargetId::new(9003)),
            ],
        };
        let section = SkillsSection::new(
            set,
            ShowcaseConfig::default(),
            scheduler.handle(),
            targets,
            SectionLayout {
                pin_start: 0.0,
                track_size: 2560.0,
            },
            &mut scroll,
            &mut backend,
        );

        Self {
            scheduler,
            scroll,
            section,
            backend,
        }
    }

    fn frame(&mut self, dt_ms: f32) {
        self.scroll.tick(dt_ms);
        self.scheduler.tick(dt_ms);
        self.section.update(&self.scroll, &mut self.backend);
    }

    fn run_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame(16.0);
        }
    }

    fn jump_to_progress(&mut self, p: f32) {
        let offset = self
            .scroll
            .pin(SKILLS_PIN_ID)
            .unwrap()
            .tracker()
            .offset_for_progress(p);
        self.scroll.scroll_to(offset, 0.0, Easing::Linear);
        self.frame(0.0);
    }
}

#[test]
fn progress_ticks_yield_expected_indices_and_transitions() {
    let mut h = Harness::new(Viewport::new(1280.0, 800.0));

    let mut indices = Vec::new();
    for p in [0.0, 0.2, 0.6, 1.0] {
        h.jump_to_progress(p);
        indices.push(h.section.active_index());
    }

    assert_eq!(indices, vec![0, 0, 1, 2]);
    assert_eq!(h.section.transitions_started(), 2);
}

#[test]
fn wheel_input_walks_the_section() {
    let mut h = Harness::new(Viewport::new(1280.0, 800.0));

    // Wheel down hard; the eased offset chases the raw target
    for _ in 0..10 {
        h.scroll.handle_event(&InputEvent::scroll(0.0, 256.0));
        h.run_frames(3);
    }
    h.run_frames(300);

    // 2560px of raw scroll over a 2560px extent: the section completed
    assert_eq!(h.section.active_index(), 2);
    assert!((h.section.progress() - 1.0).abs() < 1e-3);

    // The final panel is fully revealed after the sequences settle
    assert_eq!(
        h.backend.last(TargetId::new(3000), VisualProp::ClipTop),
        Some(0.0)
    );
    assert_eq!(
        h.backend.last(TargetId::new(3050), VisualProp::Opacity),
        Some(1.0)
    );
}

#[test]
fn snap_resolves_mid_scroll_release() {
    let mut h = Harness::new(Viewport::new(1280.0, 800.0));

    h.jump_to_progress(0.42);
    h.section
        .handle_event(&InputEvent::new(EventType::ScrollEnd), &mut h.scroll);
    h.run_frames(150);

    assert!((h.section.progress() - 0.5).abs() < 1e-3);
    assert_eq!(h.section.active_index(), 1);
}

#[test]
fn keyboard_navigation_matches_snap_grid() {
    let mut h = Harness::new(Viewport::new(1280.0, 800.0));

    h.section
        .handle_event(&InputEvent::key_down(KeyCode::ArrowRight), &mut h.scroll);
    h.run_frames(150);
    assert!((h.section.progress() - 0.5).abs() < 1e-3);

    h.section
        .handle_event(&InputEvent::key_down(KeyCode::ArrowRight), &mut h.scroll);
    h.run_frames(150);
    assert!((h.section.progress() - 1.0).abs() < 1e-3);
    assert_eq!(h.section.active_index(), 2);

    // Stepping past the end clamps
    h.section
        .handle_event(&InputEvent::key_down(KeyCode::ArrowRight), &mut h.scroll);
    h.run_frames(150);
    assert!((h.section.progress() - 1.0).abs() < 1e-3);
}

#[test]
fn layout_switch_mid_transition_leaves_one_input_mode() {
    let mut h = Harness::new(Viewport::new(1280.0, 800.0));

    // Kick off a transition and interrupt it mid-flight
    h.jump_to_progress(0.6);
    h.run_frames(5);
    assert!(h.section.is_transition_running());

    h.scroll.set_viewport(Viewport::new(700.0, 900.0));
    h.section.set_viewport(&mut h.scroll, &mut h.backend);

    assert_eq!(h.section.input_mode(), InputMode::Mobile);
    assert!(!h.section.keyboard_bound());
    assert_eq!(h.scroll.pin_count(), 0);
    assert!(!h.section.is_transition_running());

    // Running more frames in mobile mode is inert and panic-free
    h.run_frames(30);

    // Back to desktop: exactly one mode again
    h.scroll.set_viewport(Viewport::new(1280.0, 800.0));
    h.section.set_viewport(&mut h.scroll, &mut h.backend);
    assert_eq!(h.section.input_mode(), InputMode::Desktop);
    assert!(h.section.keyboard_bound());
    assert_eq!(h.scroll.pin_count(), 1);
}

#[test]
fn teardown_leaves_no_registrations_or_animations() {
    let mut h = Harness::new(Viewport::new(1280.0, 800.0));

    h.jump_to_progress(0.6);
    h.run_frames(5);

    h.section.teardown(&mut h.scroll);
    assert_eq!(h.scroll.pin_count(), 0);
    assert!(!h.section.keyboard_bound());

    // Orchestrator timelines were released; only indicator tweens may
    // remain registered and none of them keep playing forever
    h.run_frames(60);
    assert!(!h.scheduler.has_active_animations());

    // Events after teardown change nothing
    let writes = h.backend.write_count();
    h.section
        .handle_event(&InputEvent::key_down(KeyCode::ArrowRight), &mut h.scroll);
    h.run_frames(2);
    assert_eq!(h.scroll.pin_count(), 0);
    assert_eq!(h.backend.write_count(), writes);
}

#[test]
fn mobile_viewport_never_mounts_desktop_bindings() {
    let h = Harness::new(Viewport::new(600.0, 900.0));
    assert_eq!(h.section.input_mode(), InputMode::Mobile);
    assert_eq!(h.scroll.pin_count(), 0);
    assert!(!h.section.keyboard_bound());

    // The stacked fallback is fully visible from the start
    assert_eq!(
        h.backend.last(TargetId::new(2000), VisualProp::ClipTop),
        Some(0.0)
    );
}
