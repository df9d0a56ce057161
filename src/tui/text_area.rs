//! Display state for the node event text area.
//!
//! The text area is the application's sole output surface. Each received
//! notification payload replaces the previous value wholesale; nothing is
//! appended, merged, or parsed.

// Rust guideline compliant 2026-02

/// Text shown before the first notification arrives.
///
/// A client whose connection never completes keeps this value for the
/// lifetime of the process.
pub const INITIAL_TEXT: &str = "Waiting for node events...";

/// Persistent state for the notification text area.
///
/// Holds the raw payload of the most recent notification. Writes are full
/// overwrites; the display loop is the only writer.
#[derive(Debug)]
pub struct TextArea {
    /// Current display text (payload of the latest notification, verbatim).
    value: String,
}

impl TextArea {
    /// Create a text area showing the waiting placeholder.
    pub fn new() -> Self {
        Self {
            value: INITIAL_TEXT.to_string(),
        }
    }

    /// Get the current text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the entire text with a notification payload.
    ///
    /// The previous value is discarded, never appended to.
    pub fn set(&mut self, payload: String) {
        self.value = payload;
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_placeholder() {
        let area = TextArea::new();
        assert_eq!(area.value(), INITIAL_TEXT);
    }

    #[test]
    fn set_replaces_value() {
        let mut area = TextArea::new();
        area.set("node-7 down".to_string());
        assert_eq!(area.value(), "node-7 down");
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut area = TextArea::new();
        area.set("node-7 down".to_string());
        area.set("node-7 up".to_string());

        // Replacement, not accumulation
        assert_eq!(area.value(), "node-7 up");
    }

    #[test]
    fn set_keeps_payload_verbatim() {
        let mut area = TextArea::new();
        area.set("  line one\nline two\t\n".to_string());
        assert_eq!(area.value(), "  line one\nline two\t\n");
    }

    #[test]
    fn empty_payload_clears_display() {
        let mut area = TextArea::new();
        area.set("node-7 down".to_string());
        area.set(String::new());
        assert_eq!(area.value(), "");
    }
}
