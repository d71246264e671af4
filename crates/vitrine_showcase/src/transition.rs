//! Transition state
//!
//! Tracks which panel is in focus and which one just left. Advancing to
//! the index already in focus is a no-op: downstream animation triggers
//! fire exactly once per actual change.

use vitrine_core::StateTransitions;

/// Internal events for the transition phase machine
pub mod transition_events {
    /// A panel transition began
    pub const BEGIN: u32 = 10100;
    /// Both enter and exit sequences completed (or were cancelled)
    pub const FINISHED: u32 = 10101;
}

/// Whether a panel transition is animating
///
/// `FINISHED` in `Idle` is deliberately absorbed — a second completion
/// call before teardown must be a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Running,
}

impl TransitionPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, TransitionPhase::Running)
    }
}

impl StateTransitions for TransitionPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use transition_events::*;
        match (self, event) {
            (TransitionPhase::Idle, BEGIN) => Some(TransitionPhase::Running),
            // A new transition can begin while one is running (it replaces it)
            (TransitionPhase::Running, BEGIN) => None,
            (TransitionPhase::Running, FINISHED) => Some(TransitionPhase::Idle),
            (TransitionPhase::Idle, FINISHED) => None,
            _ => None,
        }
    }
}

/// An actual index change: which panel exits, which enters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub previous: Option<usize>,
    pub current: usize,
}

/// Previous/current index pair with an idempotence guard
#[derive(Clone, Copy, Debug)]
pub struct TransitionState {
    previous: Option<usize>,
    current: usize,
}

impl TransitionState {
    /// Start focused on panel 0 with no previous panel
    pub fn new() -> Self {
        Self::with_initial(0)
    }

    pub fn with_initial(index: usize) -> Self {
        Self {
            previous: None,
            current: index,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Move focus to `next`
    ///
    /// Returns the transition to play, or None when `next` is already in
    /// focus (repeated observations of the same index are no-ops).
    pub fn advance(&mut self, next: usize) -> Option<Transition> {
        if next == self.current {
            return None;
        }
        self.previous = Some(self.current);
        self.current = next;
        Some(Transition {
            previous: self.previous,
            current: self.current,
        })
    }
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_idempotent_per_index() {
        let mut state = TransitionState::new();
        assert_eq!(state.advance(0), None);
        assert_eq!(state.advance(0), None);

        let t = state.advance(1).unwrap();
        assert_eq!(t.previous, Some(0));
        assert_eq!(t.current, 1);

        assert_eq!(state.advance(1), None);

        let t = state.advance(0).unwrap();
        assert_eq!(t.previous, Some(1));
        assert_eq!(t.current, 0);
    }

    #[test]
    fn phase_absorbs_double_finish() {
        let mut phase = TransitionPhase::Idle;
        assert!(phase.apply(transition_events::BEGIN));
        assert!(phase.is_running());

        assert!(phase.apply(transition_events::FINISHED));
        assert!(!phase.is_running());
        // Second finish before teardown: no transition, no panic
        assert!(!phase.apply(transition_events::FINISHED));
    }

    #[test]
    fn begin_while_running_keeps_running() {
        let mut phase = TransitionPhase::Running;
        assert!(!phase.apply(transition_events::BEGIN));
        assert!(phase.is_running());
    }
}
