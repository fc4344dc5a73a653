//! Termination state
//!
//! Records whether a hub has ended and with which terminal event. The first
//! terminal event wins; later ones are ignored.

use crate::event::Terminal;

#[derive(Debug, Default)]
pub(crate) struct TerminationState {
    terminal: Option<Terminal>,
}

impl TerminationState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `terminal` if none is recorded yet.
    ///
    /// Returns true only for the call that establishes the terminal state.
    pub(crate) fn observe(&mut self, terminal: &Terminal) -> bool {
        if self.terminal.is_some() {
            return false;
        }
        self.terminal = Some(terminal.clone());
        true
    }

    pub(crate) fn get(&self) -> Option<&Terminal> {
        self.terminal.as_ref()
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.terminal.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HubError;

    #[test]
    fn test_first_terminal_wins() {
        let mut state = TerminationState::new();
        assert!(!state.is_terminated());

        assert!(state.observe(&Terminal::Completed));
        assert!(state.is_terminated());

        // Later terminals are dropped
        assert!(!state.observe(&Terminal::Error(HubError::msg("late"))));
        assert!(!state.observe(&Terminal::Completed));
        assert!(matches!(state.get(), Some(Terminal::Completed)));
    }

    #[test]
    fn test_error_recorded() {
        let mut state = TerminationState::new();
        assert!(state.observe(&Terminal::Error(HubError::msg("boom"))));
        assert!(state.get().is_some_and(Terminal::is_error));
    }
}
