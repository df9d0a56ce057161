//! RAII terminal restoration.
//!
//! The display loop puts the terminal into raw mode on the alternate
//! screen. If the process leaves without undoing that, the user's shell
//! is left with a hidden cursor and unechoed keystrokes. [`TerminalGuard`]
//! ties the undo to scope exit; the panic hook in `main` reuses the same
//! [`TerminalGuard::restore`] path so a panicking display loop still hands
//! the shell back in a usable state.

use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
use crossterm::{cursor, execute};

/// Restores the terminal when dropped.
///
/// Create one right after entering raw mode and keep it alive for the
/// whole display loop:
///
/// ```ignore
/// enable_raw_mode()?;
/// execute!(stdout(), EnterAlternateScreen)?;
/// let _guard = TerminalGuard::new();
/// // raw mode and the alternate screen end with this scope
/// ```
pub struct TerminalGuard;

impl TerminalGuard {
    /// Creates a guard; restoration happens on drop.
    pub fn new() -> Self {
        Self
    }

    /// Undo raw mode, leave the alternate screen, and show the cursor.
    ///
    /// Errors are ignored: this runs during teardown (drop or panic) where
    /// there is nothing useful left to do with a failure, and each step is
    /// attempted even if an earlier one fails.
    pub fn restore() {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), cursor::Show);
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        Self::restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_construction_and_drop() {
        let guard = TerminalGuard::new();
        drop(guard);
        let _default = TerminalGuard::default();
    }

    #[test]
    fn test_restore_is_repeatable() {
        // restore() ignores errors, so calling it on an already-restored
        // terminal must not panic
        TerminalGuard::restore();
        TerminalGuard::restore();
    }
}
