use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tracing::{debug, warn};

/// Terminal in raw mode with keyboard and mouse input captured
///
/// Input capture is held for the lifetime of this value and released on
/// drop, including when the UI loop returns early with an error.
pub struct TerminalSession {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("Terminal session started");
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let restored = disable_raw_mode()
            .and_then(|_| {
                execute!(
                    self.terminal.backend_mut(),
                    DisableMouseCapture,
                    LeaveAlternateScreen
                )
            })
            .and_then(|_| self.terminal.show_cursor());

        match restored {
            Ok(()) => debug!("Terminal session released"),
            Err(err) => warn!("Failed to restore terminal: {}", err),
        }
    }
}
