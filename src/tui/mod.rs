//! TUI - Terminal User Interface.
//!
//! This module provides the terminal rendering, input handling, and event
//! loop for the notification display. The TUI runs on the main thread,
//! polling the client's notification queue each frame.
//!
//! # Architecture
//!
//! ```text
//! TuiRunner (main thread)
//! ├── owns: terminal, text_area, quit flag
//! ├── drains: notification payloads via NotificationClient::try_recv
//! └── observes: session lifecycle state for the title bar
//! ```
//!
//! # Modules
//!
//! - [`guard`] - Terminal state RAII guard for cleanup
//! - [`render`] - Main rendering function
//! - [`runner`] - TuiRunner struct and event loop
//! - [`text_area`] - Display state for the notification text area

// Rust guideline compliant 2026-02

pub mod guard;
pub mod render;
pub mod runner;
pub mod text_area;

#[doc(inline)]
pub use guard::TerminalGuard;
#[doc(inline)]
pub use render::{render, RenderContext};
#[doc(inline)]
pub use runner::TuiRunner;
#[doc(inline)]
pub use text_area::TextArea;
