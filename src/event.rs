//! Event types delivered through a hub
//!
//! Every hub carries a sequence of [`Event`]s: any number of `Next` values
//! followed by at most one terminal event (`Completed` or `Error`).

use crate::error::HubError;

/// A single event in a hub's sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    /// A value
    Next(T),
    /// Successful end of the sequence
    Completed,
    /// Failed end of the sequence
    Error(HubError),
}

impl<T> Event<T> {
    /// Check if this event ends the sequence
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Event::Next(_))
    }

    /// Borrow the value of a `Next` event
    pub fn value(&self) -> Option<&T> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Take the value of a `Next` event
    pub fn into_value(self) -> Option<T> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the error of an `Error` event
    pub fn error(&self) -> Option<&HubError> {
        match self {
            Event::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Map the value of a `Next` event, keeping terminal events as they are
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Event<U> {
        match self {
            Event::Next(value) => Event::Next(f(value)),
            Event::Completed => Event::Completed,
            Event::Error(err) => Event::Error(err),
        }
    }

    /// Split a terminal event off, handing a `Next` value back unchanged
    pub(crate) fn into_terminal(self) -> Result<Terminal, T> {
        match self {
            Event::Next(value) => Err(value),
            Event::Completed => Ok(Terminal::Completed),
            Event::Error(err) => Ok(Terminal::Error(err)),
        }
    }

    /// Short label for the event kind, used in log fields
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Event::Next(_) => "next",
            Event::Completed => "completed",
            Event::Error(_) => "error",
        }
    }
}

/// The terminal event recorded by a hub
#[derive(Debug, Clone)]
pub(crate) enum Terminal {
    Completed,
    Error(HubError),
}

impl Terminal {
    pub(crate) fn is_error(&self) -> bool {
        matches!(self, Terminal::Error(_))
    }

    pub(crate) fn to_event<T>(&self) -> Event<T> {
        match self {
            Terminal::Completed => Event::Completed,
            Terminal::Error(err) => Event::Error(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(!Event::Next(1).is_terminal());
        assert!(Event::<i32>::Completed.is_terminal());
        assert!(Event::<i32>::Error(HubError::Disposed).is_terminal());
    }

    #[test]
    fn test_accessors() {
        let next = Event::Next("a");
        assert_eq!(next.value(), Some(&"a"));
        assert!(next.error().is_none());
        assert_eq!(next.into_value(), Some("a"));

        let err = Event::<&str>::Error(HubError::msg("x"));
        assert!(err.value().is_none());
        assert_eq!(err.error().map(|e| e.to_string()), Some("x".to_string()));
    }

    #[test]
    fn test_map_keeps_terminals() {
        assert_eq!(Event::Next(2).map(|v| v * 10), Event::Next(20));
        assert_eq!(Event::<i32>::Completed.map(|v| v + 1), Event::Completed);
    }

    #[test]
    fn test_into_terminal() {
        assert!(matches!(Event::Next(5).into_terminal(), Err(5)));
        assert!(matches!(
            Event::<i32>::Completed.into_terminal(),
            Ok(Terminal::Completed)
        ));
        let terminal = Event::<i32>::Error(HubError::msg("x")).into_terminal();
        assert!(matches!(terminal, Ok(ref t) if t.is_error()));
    }

    #[test]
    fn test_error_equality() {
        let a = Event::<i32>::Error(HubError::msg("same"));
        let b = Event::<i32>::Error(HubError::msg("same"));
        let c = Event::<i32>::Error(HubError::Disposed);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_domain_error_never_equals_disposed() {
        let lookalike = Event::<i32>::Error(HubError::msg("hub has been disposed"));
        let disposed = Event::<i32>::Error(HubError::Disposed);

        // Same text, different kind of error
        assert_eq!(
            lookalike.error().map(ToString::to_string),
            disposed.error().map(ToString::to_string)
        );
        assert_ne!(lookalike, disposed);
        assert_ne!(disposed, lookalike);
    }
}
