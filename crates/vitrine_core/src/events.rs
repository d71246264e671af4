//! Unified input event model
//!
//! Events arrive from the host environment (windowing layer, browser shim,
//! test harness) as [`InputEvent`] values. Each event carries an
//! [`EventType`] plus whatever payload that type uses; state machines
//! consume the raw `u32` code via [`crate::StateTransitions`].

use crate::geometry::Point;

/// Raw event codes for state-machine transition tables
///
/// Stable numeric codes so `StateTransitions` impls can match on
/// `(state, code)` pairs without pulling in the full event payload.
pub mod event_codes {
    pub const POINTER_ENTER: u32 = 10;
    pub const POINTER_LEAVE: u32 = 11;
    pub const POINTER_MOVE: u32 = 12;
    pub const POINTER_DOWN: u32 = 13;
    pub const POINTER_UP: u32 = 14;

    pub const SCROLL: u32 = 30;
    pub const SCROLL_END: u32 = 31;

    pub const KEY_DOWN: u32 = 40;
    pub const KEY_UP: u32 = 41;

    pub const RESIZE: u32 = 50;
}

/// The kind of an input event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    PointerEnter,
    PointerLeave,
    PointerMove,
    PointerDown,
    PointerUp,
    Scroll,
    ScrollEnd,
    KeyDown,
    KeyUp,
    Resize,
}

impl EventType {
    /// Raw code used by transition tables
    pub fn code(&self) -> u32 {
        use event_codes::*;
        match self {
            EventType::PointerEnter => POINTER_ENTER,
            EventType::PointerLeave => POINTER_LEAVE,
            EventType::PointerMove => POINTER_MOVE,
            EventType::PointerDown => POINTER_DOWN,
            EventType::PointerUp => POINTER_UP,
            EventType::Scroll => SCROLL,
            EventType::ScrollEnd => SCROLL_END,
            EventType::KeyDown => KEY_DOWN,
            EventType::KeyUp => KEY_UP,
            EventType::Resize => RESIZE,
        }
    }
}

/// Keys the showcase layer reacts to
///
/// Anything else maps to `Other` with the host's platform scancode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Other(u32),
}

/// Modifier keys held during an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A single input event with its payload
///
/// Fields not relevant to the event type are left at their defaults;
/// builders keep call sites terse.
#[derive(Clone, Copy, Debug)]
pub struct InputEvent {
    pub event_type: EventType,
    /// Pointer position, absolute (pointer events)
    pub position: Point,
    /// Scroll delta in logical pixels (scroll events)
    pub scroll_delta_x: f32,
    pub scroll_delta_y: f32,
    /// Key pressed/released (key events)
    pub key: Option<KeyCode>,
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            position: Point::ZERO,
            scroll_delta_x: 0.0,
            scroll_delta_y: 0.0,
            key: None,
            modifiers: Modifiers::default(),
        }
    }

    /// A pointer event at the given absolute position
    pub fn pointer(event_type: EventType, x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            ..Self::new(event_type)
        }
    }

    /// A scroll event with the given delta
    pub fn scroll(dx: f32, dy: f32) -> Self {
        Self {
            scroll_delta_x: dx,
            scroll_delta_y: dy,
            ..Self::new(EventType::Scroll)
        }
    }

    /// A key-down event
    pub fn key_down(key: KeyCode) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventType::KeyDown)
        }
    }

    /// Raw code for transition tables
    pub fn code(&self) -> u32 {
        self.event_type.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_codes_are_stable() {
        assert_eq!(EventType::Scroll.code(), event_codes::SCROLL);
        assert_eq!(EventType::ScrollEnd.code(), event_codes::SCROLL_END);
        assert_eq!(EventType::PointerLeave.code(), event_codes::POINTER_LEAVE);
    }

    #[test]
    fn builders_fill_payload() {
        let ev = InputEvent::scroll(0.0, -42.0);
        assert_eq!(ev.event_type, EventType::Scroll);
        assert_eq!(ev.scroll_delta_y, -42.0);

        let ev = InputEvent::key_down(KeyCode::ArrowRight);
        assert_eq!(ev.key, Some(KeyCode::ArrowRight));
    }
}
