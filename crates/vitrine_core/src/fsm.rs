//! Event-driven state transition tables
//!
//! Interaction states across the workspace are small `Copy` enums whose
//! transitions are written as a `(state, event code)` match. Returning
//! `None` means "no transition" — the caller keeps the current state.
//!
//! ```
//! use vitrine_core::{event_codes, StateTransitions};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum HoverState {
//!     Idle,
//!     Hovered,
//! }
//!
//! impl StateTransitions for HoverState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (HoverState::Idle, event_codes::POINTER_ENTER) => Some(HoverState::Hovered),
//!             (HoverState::Hovered, event_codes::POINTER_LEAVE) => Some(HoverState::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let state = HoverState::Idle;
//! assert_eq!(
//!     state.on_event(event_codes::POINTER_ENTER),
//!     Some(HoverState::Hovered)
//! );
//! ```

/// Transition table for an interaction state machine
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event code and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place, returning true if the state changed
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }
}
