//! Interactive terminal session (raw mode, alternate screen, mouse capture).

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;

/// RAII guard: the terminal is restored on drop, including early returns and panics.
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn enter(title: &str) -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide, SetTitle(title))?;
        tracing::debug!(target: "runtime", "terminal_entered");
        Ok(Self { active: true })
    }

    pub fn leave(&mut self) -> Result<()> {
        if self.active {
            execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.active = false;
            tracing::debug!(target: "runtime", "terminal_left");
        }
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
