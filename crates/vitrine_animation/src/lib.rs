//! Vitrine Animation System
//!
//! Timed tweens, staggered timelines, and a frame-driven scheduler.
//!
//! # Features
//!
//! - **Easing Functions**: quad/cubic families, exponential out, back out
//! - **Tweens**: timed from→to animations with delay, repeat, and yoyo
//! - **Typed Tweens**: generic animations over any interpolatable value
//! - **Timelines**: many entries scheduled at offsets on one clock, with
//!   per-entry easing and stagger helpers
//! - **Scheduler**: owns all registered animations, ticked once per frame
//!   by the host; wrapper types deregister on drop
//!
//! There is no ambient global and no background thread: whoever creates the
//! [`AnimationScheduler`] owns it, hands out [`SchedulerHandle`]s, and calls
//! [`AnimationScheduler::tick`] from its frame loop.

pub mod easing;
pub mod scheduler;
pub mod timeline;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use scheduler::{
    AnimatedTimeline, AnimatedTween, AnimationScheduler, SchedulerHandle, TimelineId, TweenId,
};
pub use timeline::{StaggerBuilder, Timeline, TimelineEntryId};
pub use tween::Tween;
pub use values::{Interpolate, TypedTween};
