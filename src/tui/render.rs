//! TUI rendering functions.
//!
//! This module renders the notification display to a terminal. The whole
//! screen is a single bordered paragraph: the subscribed topic path in the
//! title and the latest notification payload as the body.
//!
//! # Architecture
//!
//! Rendering is decoupled from TuiRunner via `RenderContext`:
//!
//! ```text
//! TuiRunner ──builds──> RenderContext ──passed to──> render()
//! ```
//!
//! This separation ensures:
//! - Clear contract for what rendering needs
//! - Testable rendering logic
//! - No tight coupling to TuiRunner internals

// Rust guideline compliant 2026-02

use anyhow::Result;
use ratatui::{
    backend::Backend,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::constants::NODE_EVENTS_TOPIC;
use crate::stomp::SessionState;

/// Context required for rendering the display.
///
/// `TuiRunner` builds this struct from its internal state and passes it to
/// the render function. This creates a clear interface between the runner
/// and the renderer, making dependencies explicit.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Current text area value (latest notification payload, verbatim).
    pub text: &'a str,
    /// Session lifecycle state, shown in the block title.
    pub session_state: SessionState,
}

impl RenderContext<'_> {
    /// Block title: the subscribed topic plus the session lifecycle state.
    #[must_use]
    pub fn title(&self) -> String {
        format!(" {} [{}] ", NODE_EVENTS_TOPIC, self.session_state)
    }
}

/// Render the display to the terminal.
///
/// # Arguments
///
/// * `terminal` - The ratatui terminal to render to
/// * `ctx` - Render context containing all state needed for display
pub fn render<B>(terminal: &mut Terminal<B>, ctx: &RenderContext) -> Result<()>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    terminal.draw(|f| render_frame(f, ctx))?;
    Ok(())
}

/// Render the full frame.
///
/// Internal function that does the actual rendering work. One paragraph
/// fills the whole area; there is nothing else on screen.
fn render_frame(f: &mut Frame, ctx: &RenderContext) {
    let block = Block::default().borders(Borders::ALL).title(ctx.title());
    let widget = Paragraph::new(ctx.text)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    /// Collect the symbols of one buffer row into a string.
    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_title_shows_topic_and_state() {
        let ctx = RenderContext {
            text: "",
            session_state: SessionState::Subscribed,
        };

        let title = ctx.title();
        assert!(title.contains(NODE_EVENTS_TOPIC));
        assert!(title.contains("subscribed"));
    }

    #[test]
    fn test_render_payload_into_buffer() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        let ctx = RenderContext {
            text: "node-7 down",
            session_state: SessionState::Subscribed,
        };
        render(&mut terminal, &ctx).unwrap();

        // Payload starts inside the border at (1, 1)
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(1, 1)].symbol(), "n");
        assert!(row_text(&terminal, 1).contains("node-7 down"));
        // Topic and state live in the title row
        assert!(row_text(&terminal, 0).contains(NODE_EVENTS_TOPIC));
        assert!(row_text(&terminal, 0).contains("subscribed"));
    }

    #[test]
    fn test_render_replaces_previous_payload() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        let first = RenderContext {
            text: "node-7 down",
            session_state: SessionState::Subscribed,
        };
        render(&mut terminal, &first).unwrap();

        let second = RenderContext {
            text: "node-7 up",
            session_state: SessionState::Subscribed,
        };
        render(&mut terminal, &second).unwrap();

        let row = row_text(&terminal, 1);
        assert!(row.contains("node-7 up"));
        assert!(!row.contains("down"), "stale payload left on screen: {row:?}");
    }

    #[test]
    fn test_render_wraps_long_payload() {
        let backend = TestBackend::new(20, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        let ctx = RenderContext {
            text: "alpha beta gamma delta epsilon zeta",
            session_state: SessionState::Subscribed,
        };
        render(&mut terminal, &ctx).unwrap();

        // Inner width is 18, so the payload spills onto a second row
        assert!(row_text(&terminal, 1).contains("alpha"));
        assert!(row_text(&terminal, 2).contains("delta"));
    }

    #[test]
    fn test_render_before_any_notification() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        let ctx = RenderContext {
            text: crate::tui::text_area::INITIAL_TEXT,
            session_state: SessionState::Connecting,
        };
        render(&mut terminal, &ctx).unwrap();

        assert!(row_text(&terminal, 0).contains("connecting"));
        assert!(row_text(&terminal, 1).contains("Waiting for node events"));
    }
}
