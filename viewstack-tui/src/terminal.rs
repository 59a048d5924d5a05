//! Terminal session handling.
//!
//! Raw mode and the alternate screen are entered together and left together.
//! A [`TerminalSession`] undoes both when it is dropped, so an early return
//! out of the event loop does not leave the shell in raw mode.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// The terminal type used throughout the TUI.
pub type StackTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switch `out` to the alternate screen and hide the cursor.
pub fn enter_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, Hide)
}

/// Leave the alternate screen on `out` and show the cursor again.
pub fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// The terminal while the TUI owns it.
pub struct TerminalSession {
    terminal: StackTerminal,
    active: bool,
}

impl TerminalSession {
    /// Enable raw mode and enter the alternate screen on stdout.
    pub fn enter() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        enable_raw_mode()?;

        // From here on a failure drops the session, which restores.
        let mut session = Self {
            terminal,
            active: true,
        };
        enter_screen(session.terminal.backend_mut())?;
        session.terminal.clear()?;
        tracing::debug!("Entered terminal session");
        Ok(session)
    }

    pub fn terminal(&mut self) -> &mut StackTerminal {
        &mut self.terminal
    }

    /// Leave raw mode and the alternate screen. Later calls do nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        leave_screen(self.terminal.backend_mut())?;
        tracing::debug!("Restored terminal");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(error = %err, "Failed to restore terminal");
        }
    }
}

/// Restores the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Best effort; the panic message matters more than these errors
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());

        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_screen_switches_buffer_and_hides_cursor() {
        let mut out = Vec::new();
        enter_screen(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?1049h\x1b[?25l");
    }

    #[test]
    fn leave_screen_reverses_enter_screen() {
        let mut out = Vec::new();
        leave_screen(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?1049l\x1b[?25h");
    }

    #[test]
    fn session_functions_have_expected_signatures() {
        // Entering needs a real TTY, so only check the API shape.
        fn _check_enter() -> io::Result<TerminalSession> {
            TerminalSession::enter()
        }

        fn _check_terminal(session: &mut TerminalSession) -> &mut StackTerminal {
            session.terminal()
        }

        fn _check_restore(session: &mut TerminalSession) -> io::Result<()> {
            session.restore()
        }
    }
}
