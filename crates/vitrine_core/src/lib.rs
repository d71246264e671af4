//! Vitrine Core
//!
//! Foundational primitives shared by every vitrine crate:
//!
//! - **Geometry**: points, sizes, rects, and 2D vectors
//! - **Input Events**: unified pointer/scroll/keyboard event model
//! - **State Machines**: event-code-driven transition tables for interaction states
//! - **Viewport Model**: layout-category determination (desktop vs. mobile)
//! - **Visual Backend**: the seam through which orchestration logic mutates
//!   visual properties of host elements, independent of any renderer

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod viewport;
pub mod visual;

pub use events::{event_codes, EventType, InputEvent, KeyCode, Modifiers};
pub use fsm::StateTransitions;
pub use geometry::{Point, Rect, Size, Vec2};
pub use viewport::{LayoutCategory, Viewport, DEFAULT_MOBILE_BREAKPOINT};
pub use visual::{RecordingBackend, TargetId, VisualBackend, VisualProp};
