//! afs-notify - Node event notification display.
//!
//! This crate provides a terminal client for an AFS demo server's node
//! event feed: it opens one STOMP-over-WebSocket session, registers a
//! single topic subscription, and displays each notification payload
//! verbatim in a text area.
//!
//! # Architecture
//!
//! The crate follows a one-way notification pipeline:
//!
//! - **NotificationClient** - Entry point; owns the runtime, the session
//!   state, and the notification queue
//! - **Stomp** - Background session task and frame codec (the only place
//!   network I/O happens)
//! - **TUI** - Terminal view: one text area, overwritten per notification
//!
//! # Modules
//!
//! - [`client`] - Notification client and lifecycle
//! - [`stomp`] - STOMP session task and frame codec
//! - [`tui`] - Terminal display loop
//! - [`config`] - Configuration loading/saving

// Library modules
pub mod client;
pub mod config;
pub mod constants;
pub mod env;
pub mod stomp;
pub mod tui;
pub mod ws;

// Re-export commonly used types
pub use client::NotificationClient;
pub use config::Config;
pub use stomp::SessionState;
pub use tui::{TerminalGuard, TuiRunner};
