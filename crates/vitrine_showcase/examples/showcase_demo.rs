//! Headless showcase demo
//!
//! Drives the loading gate and the pinned skills section against the
//! recording backend, simulating a viewer who waits out the loader, wheels
//! through the section, releases mid-panel, and then steps with the
//! keyboard. Run with `RUST_LOG=debug` to watch the lifecycle.

use anyhow::Result;
use vitrine_animation::AnimationScheduler;
use vitrine_core::{EventType, InputEvent, KeyCode, RecordingBackend, TargetId, Viewport};
use vitrine_scroll::{ScrollContext, SmoothScrollConfig};
use vitrine_showcase::{
    GateConfig, LoadingGate, PanelItem, PanelSet, PanelTargets, SectionLayout, ShowcaseConfig,
    SkillsSection, SkillsTargets,
};

const FRAME_MS: f32 = 16.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let panels = PanelSet::new(vec![
        PanelItem::new(
            "01",
            "Full-Stack Development",
            "From frontend interactions to backend APIs, I build complete web solutions. \
             I work with modern stacks to deliver apps that are scalable, maintainable, \
             and ready for real-world users.",
        )
        .tags(["React, Node.js, Express.js", "REST APIs, Firebase, Docker"]),
        PanelItem::new(
            "02",
            "Frontend",
            "I design and develop clean, responsive interfaces that feel intuitive \
             across devices, with a focus on clarity and accessibility.",
        )
        .tags(["Next.js, TailwindCSS", "Figma to Code"]),
        PanelItem::new(
            "03",
            "DevOps & Deployment",
            "Streamlining development workflows and ensuring reliable deployments \
             with CI/CD pipelines, containers, and cloud infrastructure.",
        )
        .tags(["Docker & Containerization", "CI/CD Pipelines", "Cloud Platforms"]),
    ]);

    let scheduler = AnimationScheduler::new();
    let mut backend = RecordingBackend::new();
    let mut scroll = ScrollContext::new(
        SmoothScrollConfig::default(),
        Viewport::new(1280.0, 800.0),
    );
    scroll.set_content_limit(8000.0);

    // Loading gate over the hero image
    let mut gate = LoadingGate::new(scheduler.handle(), GateConfig::default())
        .with_targets(Some(TargetId::new(1)), Some(TargetId::new(2)));
    gate.track("/img/hero.webp");
    gate.on_ready(|| tracing::info!("page revealed"));

    // Resolve panel piece targets the way a host UI tree would
    let targets = SkillsTargets {
        panels: panels
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                let base = 100 * (i as u64 + 1);
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
            .collect(),
        indicator_fill: Some(TargetId::new(90)),
        indicator_dots: (0..panels.len())
            .map(|d| Some(TargetId::new(91 + d as u64)))
            .collect(),
    };

    let mut section = SkillsSection::new(
        panels,
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

    // The hero image arrives, then the page finishes loading
    gate.asset_loaded("/img/hero.webp");
    gate.set_page_ready();
    while gate.is_scroll_locked() {
        scheduler.tick(FRAME_MS);
        gate.tick(FRAME_MS, &mut backend);
    }
    tracing::info!(percent = gate.percent(), "loader dismissed");

    // Wheel through the pinned section
    for burst in 0..8 {
        scroll.handle_event(&InputEvent::scroll(0.0, 280.0));
        for _ in 0..12 {
            scroll.tick(FRAME_MS);
            scheduler.tick(FRAME_MS);
            section.update(&scroll, &mut backend);
        }
        tracing::info!(
            burst,
            progress = section.progress(),
            active = section.active_index(),
            "wheel burst"
        );
    }

    // Release mid-panel: the section snaps to the nearest grid value
    let release = InputEvent::new(EventType::ScrollEnd);
    scroll.handle_event(&release);
    section.handle_event(&release, &mut scroll);
    for _ in 0..150 {
        scroll.tick(FRAME_MS);
        scheduler.tick(FRAME_MS);
        section.update(&scroll, &mut backend);
    }
    tracing::info!(
        progress = section.progress(),
        active = section.active_index(),
        "snapped"
    );

    // Step back one panel with the keyboard
    section.handle_event(&InputEvent::key_down(KeyCode::ArrowLeft), &mut scroll);
    for _ in 0..150 {
        scroll.tick(FRAME_MS);
        scheduler.tick(FRAME_MS);
        section.update(&scroll, &mut backend);
    }
    tracing::info!(
        progress = section.progress(),
        active = section.active_index(),
        writes = backend.write_count(),
        "keyboard step done"
    );

    Ok(())
}
