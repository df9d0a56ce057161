//! Notification client.
//!
//! [`NotificationClient`] is the crate's entry point. It owns the async
//! runtime, the shared session state, and the receive side of the
//! notification queue. [`NotificationClient::connect`] spawns the STOMP
//! session task and returns immediately; the display loop polls
//! [`NotificationClient::try_recv`] for payloads each frame.
//!
//! Rust guideline compliant 2026-02

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::NOTIFICATION_QUEUE_CAPACITY;
use crate::stomp::{run_session, SessionConfig, SessionState, SharedSessionState};

/// Client for the node events notification feed.
#[derive(Debug)]
pub struct NotificationClient {
    config: Config,
    /// Async runtime for the session task.
    tokio_runtime: tokio::runtime::Runtime,
    state: Arc<SharedSessionState>,
    notification_rx: mpsc::Receiver<String>,
    notification_tx: mpsc::Sender<String>,
}

impl NotificationClient {
    /// Create a client from configuration.
    ///
    /// Builds the runtime eagerly so [`Self::connect`] can spawn without
    /// blocking. No network activity happens until `connect` is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let tokio_runtime =
            tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (notification_tx, notification_rx) = mpsc::channel(NOTIFICATION_QUEUE_CAPACITY);

        Ok(Self {
            config,
            tokio_runtime,
            state: SharedSessionState::new(),
            notification_rx,
            notification_tx,
        })
    }

    /// Open the connection and register the node events subscription.
    ///
    /// Returns immediately; the session task runs in the background and
    /// reports progress through [`Self::state`]. Unguarded: a second call
    /// spawns a second session feeding the same queue.
    pub fn connect(&self) {
        log::debug!("Spawning notification session for {}", self.config.server_url);
        self.state.set(SessionState::Connecting);

        let session = SessionConfig {
            server_url: self.config.server_url.clone(),
            state: Arc::clone(&self.state),
            notification_tx: self.notification_tx.clone(),
        };

        self.tokio_runtime.spawn(run_session(session));
    }

    /// Take the next pending payload (non-blocking).
    ///
    /// Returns `None` when no payloads are queued.
    pub fn try_recv(&mut self) -> Option<String> {
        self.notification_rx.try_recv().ok()
    }

    /// Current session lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Server base URL this client targets.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    /// Sender side of the notification queue.
    ///
    /// Lets tests inject payloads without a live session.
    #[cfg(test)]
    pub(crate) fn notification_sender(&self) -> mpsc::Sender<String> {
        self.notification_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(server_url: &str) -> Config {
        Config {
            server_url: server_url.to_string(),
        }
    }

    #[test]
    fn test_client_starts_uninitialized() {
        let mut client = NotificationClient::new(test_config("http://localhost:8080")).unwrap();
        assert_eq!(client.state(), SessionState::Uninitialized);
        assert!(client.try_recv().is_none());
    }

    #[test]
    fn test_connect_moves_to_connecting() {
        // Port 1 refuses connections; the session task fails silently
        let client = NotificationClient::new(test_config("http://127.0.0.1:1")).unwrap();
        client.connect();
        assert_eq!(client.state(), SessionState::Connecting);
    }

    #[test]
    fn test_failed_connect_stays_connecting_with_no_payloads() {
        let mut client = NotificationClient::new(test_config("http://127.0.0.1:1")).unwrap();
        client.connect();

        // Give the session task time to fail
        std::thread::sleep(Duration::from_millis(300));

        assert_eq!(client.state(), SessionState::Connecting);
        assert!(client.try_recv().is_none());
    }

    #[test]
    fn test_server_url_accessor() {
        let client = NotificationClient::new(test_config("http://afs.example.com")).unwrap();
        assert_eq!(client.server_url(), "http://afs.example.com");
    }
}
