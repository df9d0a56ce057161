//! TUI Runner - the synchronous display event loop.
//!
//! The TuiRunner owns the terminal, the notification client, and the text
//! area. Notification payloads arrive on the client's queue from the
//! background session task; the loop drains them, overwrites the text
//! area, and redraws.
//!
//! # Architecture
//!
//! ```text
//! TuiRunner (main thread)
//! ├── terminal: Terminal<B>        - ratatui terminal
//! ├── client: NotificationClient   - session state + notification queue
//! ├── text_area: TextArea          - sole output surface
//! └── shutdown: Arc<AtomicBool>    - signal-driven shutdown flag
//! ```
//!
//! # Event Loop
//!
//! The TuiRunner event loop:
//! 1. Polls for keyboard input (quit keys only)
//! 2. Drains pending notification payloads into the text area
//! 3. Renders the UI
//!
//! All communication with the session task is non-blocking via the queue.

// Rust guideline compliant 2026-02

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::client::NotificationClient;
use crate::constants::{FRAME_RATE_DELAY, INPUT_POLL_INTERVAL};

use super::render::{render, RenderContext};
use super::text_area::TextArea;

/// TUI Runner - owns all display state and runs the display event loop.
///
/// The `B` type parameter is the ratatui backend type. For production use,
/// this is `CrosstermBackend<Stdout>`. For testing, `TestBackend` can be used.
///
/// The runner never writes to the session; it only observes its state and
/// drains its notification queue. Quitting the loop exits the process, which
/// is also how the connection is released.
pub struct TuiRunner<B: Backend> {
    /// Notification client (owns the session task and the queue).
    client: NotificationClient,

    /// Ratatui terminal for rendering.
    terminal: Terminal<B>,

    /// Display state: the latest notification payload, verbatim.
    text_area: TextArea,

    /// Shutdown flag (shared with signal handlers for coordinated shutdown).
    shutdown: Arc<AtomicBool>,

    /// Internal quit flag.
    quit: bool,
}

impl<B: Backend> std::fmt::Debug for TuiRunner<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TuiRunner")
            .field("session_state", &self.client.state())
            .field("text_len", &self.text_area.value().len())
            .field("quit", &self.quit)
            .finish_non_exhaustive()
    }
}

impl<B> TuiRunner<B>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    /// Create a new TuiRunner.
    ///
    /// # Arguments
    ///
    /// * `terminal` - The ratatui terminal (ownership transferred to runner)
    /// * `client` - The notification client (already connected or connecting)
    /// * `shutdown` - Shared shutdown flag
    pub fn new(terminal: Terminal<B>, client: NotificationClient, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            client,
            terminal,
            text_area: TextArea::new(),
            shutdown,
            quit: false,
        }
    }

    /// Current text area value.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text_area.value()
    }

    /// Check if the runner should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit || self.shutdown.load(Ordering::SeqCst)
    }

    /// Run the display event loop.
    ///
    /// This is the main entry point. Blocks until quit is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        log::info!("TuiRunner event loop starting");

        while !self.should_quit() {
            // 1. Handle keyboard input
            self.poll_input()?;

            if self.should_quit() {
                break;
            }

            // 2. Drain notification payloads into the text area
            self.drain_notifications();

            // 3. Render
            self.render()?;

            // Small sleep to prevent CPU spinning (60 FPS max)
            std::thread::sleep(FRAME_RATE_DELAY);
        }

        log::info!("TuiRunner event loop exiting");
        Ok(())
    }

    /// Poll for keyboard input and handle it.
    fn poll_input(&mut self) -> Result<()> {
        if event::poll(INPUT_POLL_INTERVAL)? {
            let ev = event::read()?;
            self.handle_input_event(&ev);
        }
        Ok(())
    }

    /// Handle a terminal input event.
    ///
    /// The display is read-only, so the only recognized inputs are the quit
    /// keys. Resizes are absorbed by ratatui's autoresize on the next draw.
    fn handle_input_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Drain pending notifications into the text area.
    ///
    /// Each payload fully replaces the previous value, so draining a backlog
    /// converges on the most recent notification.
    fn drain_notifications(&mut self) {
        // Process up to 100 payloads per tick
        for _ in 0..100 {
            match self.client.try_recv() {
                Some(payload) => {
                    log::debug!("Displaying notification ({} bytes)", payload.len());
                    self.text_area.set(payload);
                }
                None => break,
            }
        }
    }

    /// Render the display.
    fn render(&mut self) -> Result<()> {
        let ctx = RenderContext {
            text: self.text_area.value(),
            session_state: self.client.state(),
        };
        render(&mut self.terminal, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tui::text_area::INITIAL_TEXT;
    use crossterm::event::KeyEvent;
    use ratatui::backend::TestBackend;

    /// Creates a `TuiRunner` with a `TestBackend` for unit testing.
    ///
    /// The client points at a closed port and is never connected, so tests
    /// exercise the display loop without any network activity.
    fn create_test_runner() -> TuiRunner<TestBackend> {
        let backend = TestBackend::new(80, 24);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");

        let config = Config {
            server_url: "http://127.0.0.1:1".to_string(),
        };
        let client = NotificationClient::new(config).expect("Failed to create client");
        let shutdown = Arc::new(AtomicBool::new(false));

        TuiRunner::new(terminal, client, shutdown)
    }

    /// Collect the symbols of one buffer row into a string.
    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    // =========================================================================
    // Quit Handling
    // =========================================================================

    #[test]
    fn test_q_key_quits() {
        let mut runner = create_test_runner();
        assert!(!runner.should_quit());

        runner.handle_input_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
        )));
        assert!(runner.should_quit());
    }

    #[test]
    fn test_esc_key_quits() {
        let mut runner = create_test_runner();
        runner.handle_input_event(&Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(runner.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut runner = create_test_runner();
        runner.handle_input_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(runner.should_quit());
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut runner = create_test_runner();
        runner.handle_input_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )));
        runner.handle_input_event(&Event::Key(KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::NONE,
        )));
        assert!(!runner.should_quit());
    }

    #[test]
    fn test_shutdown_flag_stops_loop() {
        let mut runner = create_test_runner();
        runner.shutdown.store(true, Ordering::SeqCst);

        // Loop condition is false on entry, so run returns immediately
        runner.run().expect("run should exit cleanly");
        assert!(runner.should_quit());
    }

    // =========================================================================
    // Notification Display
    // =========================================================================

    #[test]
    fn test_text_starts_with_placeholder() {
        let mut runner = create_test_runner();
        assert_eq!(runner.text(), INITIAL_TEXT);

        // Draining an empty queue changes nothing
        runner.drain_notifications();
        assert_eq!(runner.text(), INITIAL_TEXT);
    }

    #[test]
    fn test_notifications_overwrite_text_area() {
        let mut runner = create_test_runner();
        let tx = runner.client.notification_sender();

        tx.blocking_send("node-7 down".to_string()).unwrap();
        runner.drain_notifications();
        assert_eq!(runner.text(), "node-7 down");

        tx.blocking_send("node-7 up".to_string()).unwrap();
        runner.drain_notifications();
        assert_eq!(runner.text(), "node-7 up");
    }

    #[test]
    fn test_backlog_converges_to_latest_payload() {
        let mut runner = create_test_runner();
        let tx = runner.client.notification_sender();

        for i in 0..10 {
            tx.blocking_send(format!("node-{i} down")).unwrap();
        }
        runner.drain_notifications();

        assert_eq!(runner.text(), "node-9 down");
    }

    #[test]
    fn test_render_shows_current_text() {
        let mut runner = create_test_runner();
        let tx = runner.client.notification_sender();

        tx.blocking_send("node-7 down".to_string()).unwrap();
        runner.drain_notifications();
        runner.render().expect("render should succeed");

        assert!(row_text(&runner.terminal, 1).contains("node-7 down"));
    }
}
