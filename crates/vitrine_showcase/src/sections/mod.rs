//! Composed showcase sections
//!
//! Each section wires the core pieces — pinned progress, index mapping,
//! orchestration, tilt, reveal — against a host-supplied set of resolved
//! targets. Sections own their input bindings: crossing the mobile
//! breakpoint tears the desktop bindings down synchronously before the
//! mobile presentation is considered active, so exactly one input mode is
//! live at any instant.

mod gallery;
mod skills;
mod works;

pub use gallery::{GallerySection, GalleryTargets, GALLERY_PIN_ID};
pub use skills::{SkillsSection, SkillsTargets, SKILLS_PIN_ID};
pub use works::{WorksCardTargets, WorksSection};

/// Which input-handling mode a section currently runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Pinned scroll, keyboard navigation, pointer effects
    Desktop,
    /// Static stacked content, native scrolling only
    Mobile,
}

/// Host-measured layout of a pinned span
#[derive(Clone, Copy, Debug)]
pub struct SectionLayout {
    /// Scroll offset at which the section pins
    pub pin_start: f32,
    /// Measured track content size
    pub track_size: f32,
}
