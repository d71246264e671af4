//! Vitrine Scroll
//!
//! Virtualized smooth scrolling and pinned-region progress tracking.
//!
//! The [`ScrollContext`] owns everything: a scroll engine (eased
//! [`SmoothScroll`] or the [`NativeScroll`] fallback) and a [`PinRegistry`]
//! of pinned sections, each converting the shared scroll offset into a
//! normalized progress value. The host feeds input events and a frame
//! clock in; registered pins get progress callbacks out.
//!
//! ```
//! use vitrine_scroll::{Pin, PinnedTracker, ExtentPolicy, ScrollContext, SmoothScrollConfig};
//! use vitrine_core::{InputEvent, Viewport};
//!
//! let mut ctx = ScrollContext::new(SmoothScrollConfig::default(), Viewport::new(1280.0, 800.0));
//! ctx.set_content_limit(4000.0);
//!
//! let tracker = PinnedTracker::new(ExtentPolicy::TrackOrViewport { factor: 2.0 });
//! ctx.register_pin("gallery", Pin::new(tracker, 3000.0));
//!
//! ctx.handle_event(&InputEvent::scroll(0.0, 120.0));
//! ctx.tick(16.0);
//! let progress = ctx.pin_progress("gallery").unwrap();
//! assert!(progress >= 0.0 && progress <= 1.0);
//! ```

pub mod context;
pub mod error;
pub mod pin;
pub mod progress;
pub mod smooth;
pub mod state;

pub use context::ScrollContext;
pub use error::ScrollError;
pub use pin::{Pin, PinRegistry};
pub use progress::{ExtentPolicy, PinnedTracker};
pub use smooth::{NativeScroll, ScrollEngine, SmoothScroll, SmoothScrollConfig};
pub use state::ScrollMotion;
