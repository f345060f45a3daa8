//! TerminalRenderer: flushes rendered rows to a real terminal.
//!
//! Full redraw every frame; the board is small enough that diffing would
//! buy nothing.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::Print,
    terminal, QueueableCommand,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a frame of pre-rendered rows starting at the top-left corner.
    pub fn draw(&mut self, rows: &[String]) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        for (y, row) in rows.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            self.stdout.queue(Print(row))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
