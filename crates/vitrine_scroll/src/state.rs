//! Scroll motion state machine
//!
//! ```text
//!                SCROLL
//!     Idle ────────────────► Scrolling
//!       ▲                        │
//!       │ settled                │ SCROLL_END
//!       │                        ▼
//!       └──────────────────── Easing
//! ```
//!
//! `Easing` covers the tail after the user releases input while the eased
//! offset is still approaching the raw target. A new scroll event in any
//! state returns to `Scrolling`.

use vitrine_core::{event_codes, StateTransitions};

/// Internal events for scroll motion (not exposed to users)
pub mod scroll_events {
    /// Eased offset reached the raw target
    pub const SETTLED: u32 = 10001;
}

/// Motion state of the scroll engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollMotion {
    /// No scrolling, offset at rest
    #[default]
    Idle,
    /// Receiving active scroll input
    Scrolling,
    /// Input ended, eased offset still converging on the target
    Easing,
}

impl ScrollMotion {
    /// Returns true if the offset is still moving
    pub fn is_active(&self) -> bool {
        !matches!(self, ScrollMotion::Idle)
    }
}

impl StateTransitions for ScrollMotion {
    fn on_event(&self, event: u32) -> Option<Self> {
        use scroll_events::*;

        match (self, event) {
            (ScrollMotion::Idle, event_codes::SCROLL) => Some(ScrollMotion::Scrolling),
            (ScrollMotion::Scrolling, event_codes::SCROLL) => None,
            (ScrollMotion::Scrolling, event_codes::SCROLL_END) => Some(ScrollMotion::Easing),
            (ScrollMotion::Scrolling, SETTLED) => Some(ScrollMotion::Idle),
            (ScrollMotion::Easing, event_codes::SCROLL) => Some(ScrollMotion::Scrolling),
            (ScrollMotion::Easing, SETTLED) => Some(ScrollMotion::Idle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle() {
        let mut state = ScrollMotion::Idle;
        assert!(state.apply(event_codes::SCROLL));
        assert_eq!(state, ScrollMotion::Scrolling);

        // Repeated scroll input keeps the state
        assert!(!state.apply(event_codes::SCROLL));

        assert!(state.apply(event_codes::SCROLL_END));
        assert_eq!(state, ScrollMotion::Easing);

        assert!(state.apply(scroll_events::SETTLED));
        assert_eq!(state, ScrollMotion::Idle);
    }

    #[test]
    fn scroll_during_easing_resumes() {
        let mut state = ScrollMotion::Easing;
        assert!(state.apply(event_codes::SCROLL));
        assert_eq!(state, ScrollMotion::Scrolling);
    }
}
