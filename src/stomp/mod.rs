//! STOMP session layer.
//!
//! This module speaks just enough STOMP 1.2 to act as a notification
//! subscriber: one session per connection, one subscription, payloads
//! delivered verbatim.
//!
//! # Architecture
//!
//! ```text
//! NotificationClient
//!     │
//!     ├── SharedSessionState (observed by the display loop)
//!     │
//!     └── run_session (background task on the client's runtime)
//!         ├── frame    (wire codec)
//!         └── ws       (WebSocket transport)
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──connect()──► Connecting ──CONNECTED+SUBSCRIBE──► Subscribed
//! ```
//!
//! The lifecycle only moves forward. There is no disconnected or error
//! state: a session that fails to establish stays `Connecting`, and a
//! session that dies stays `Subscribed`. Failures are visible in the log
//! and nowhere else.
//!
//! Rust guideline compliant 2026-02

pub mod frame;
pub mod session;

use std::sync::{Arc, RwLock};

/// Lifecycle state of the notification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// `connect()` has not been called yet.
    #[default]
    Uninitialized,
    /// Connection attempt started; handshake not yet complete.
    Connecting,
    /// Handshake complete and the subscription registered.
    Subscribed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Connecting => write!(f, "connecting"),
            Self::Subscribed => write!(f, "subscribed"),
        }
    }
}

/// Session state shared between the session task and the display loop.
///
/// Reads tolerate a poisoned lock by reporting the default state; the
/// display loop must never panic because the session task did.
#[derive(Debug, Default)]
pub struct SharedSessionState {
    state: RwLock<SessionState>,
}

impl SharedSessionState {
    /// Create new shared state.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get the current state.
    #[must_use]
    pub fn get(&self) -> SessionState {
        self.state.read().map(|s| *s).unwrap_or_default()
    }

    /// Set the state.
    pub fn set(&self, new_state: SessionState) {
        if let Ok(mut state) = self.state.write() {
            *state = new_state;
        }
    }

    /// Check if the subscription is active.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.get() == SessionState::Subscribed
    }
}

// Re-exports
pub use frame::{Command, Frame, FrameError};
pub use session::{run_session, SessionConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults_to_uninitialized() {
        let shared = SharedSessionState::new();
        assert_eq!(shared.get(), SessionState::Uninitialized);
        assert!(!shared.is_subscribed());
    }

    #[test]
    fn test_state_set_and_get() {
        let shared = SharedSessionState::new();

        shared.set(SessionState::Connecting);
        assert_eq!(shared.get(), SessionState::Connecting);
        assert!(!shared.is_subscribed());

        shared.set(SessionState::Subscribed);
        assert_eq!(shared.get(), SessionState::Subscribed);
        assert!(shared.is_subscribed());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(SessionState::Connecting.to_string(), "connecting");
        assert_eq!(SessionState::Subscribed.to_string(), "subscribed");
    }
}
