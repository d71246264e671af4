//! Vitrine Showcase
//!
//! The presentation layer of the workspace: panel data, the progress →
//! index mapping, the transition orchestrator, pointer tilt, viewport
//! reveal, the loading gate, and the composed sections that wire it all
//! to a [`vitrine_scroll::ScrollContext`] and a host
//! [`vitrine_core::VisualBackend`].
//!
//! # Frame protocol
//!
//! The host owns the frame loop and, each frame:
//!
//! 1. feeds input events into the [`vitrine_scroll::ScrollContext`] and
//!    the sections,
//! 2. ticks the scroll context and the [`vitrine_animation::AnimationScheduler`],
//! 3. calls each section's `update`/`tick` with the visual backend.
//!
//! Everything is single-threaded and cooperative; no section spawns
//! threads or holds ambient global state.

pub mod config;
pub mod index;
pub mod indicator;
pub mod loading;
pub mod orchestrator;
pub mod panel;
pub mod reveal;
pub mod sections;
pub mod tilt;
pub mod transition;

pub use config::{EnterSpec, ExitSpec, ShowcaseConfig, StageSpec};
pub use index::IndexMapper;
pub use indicator::ProgressIndicator;
pub use loading::{GateConfig, GateState, LoadingGate, Preloader};
pub use orchestrator::{PanelTargets, TimelineOrchestrator};
pub use panel::{split_description_lines, CardPosition, PanelItem, PanelSet, WORDS_PER_LINE};
pub use reveal::{BatchReveal, BatchRevealConfig};
pub use sections::{
    GallerySection, GalleryTargets, InputMode, SectionLayout, SkillsSection, SkillsTargets,
    WorksCardTargets, WorksSection, GALLERY_PIN_ID, SKILLS_PIN_ID,
};
pub use tilt::{base_rotation, TiltAngles, TiltConfig, TiltController};
pub use transition::{Transition, TransitionPhase, TransitionState};
