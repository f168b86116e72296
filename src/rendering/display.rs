//! # Terminal Display
//!
//! Crossterm front end: raw mode, the alternate screen and drawing composed
//! frames centred in the terminal.

use crate::game::Frame;
use crate::rendering::{compose, status_line, Renderer};
use crate::L1tResult;
use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use log::debug;
use std::io::{self, Stdout, Write};

/// Rows under the grid for the status and help lines.
const FOOTER_ROWS: u16 = 2;

/// The player's terminal, held in raw mode on the alternate screen for as
/// long as this value lives.
pub struct TerminalDisplay {
    stdout: Stdout,
    help: String,
}

impl TerminalDisplay {
    /// Takes over the terminal.
    ///
    /// `help` is shown under the grid on every frame.
    pub fn new(help: String) -> L1tResult<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }
        debug!("Terminal display started");
        Ok(Self { stdout, help })
    }

    fn banner(&mut self, lines: &[String]) -> L1tResult<()> {
        let (term_cols, term_rows) = terminal::size()?;
        queue!(self.stdout, ResetColor, Clear(ClearType::All))?;

        let height = lines.len() as u16;
        let top = term_rows.saturating_sub(height) / 2;
        for (i, line) in lines.iter().enumerate() {
            let width = line.chars().count() as u16;
            let left = term_cols.saturating_sub(width) / 2;
            queue!(self.stdout, MoveTo(left, top + i as u16), Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn draw(&mut self, frame: &Frame<'_>) -> L1tResult<()> {
        let (term_cols, term_rows) = terminal::size()?;
        let rows = compose(frame);

        queue!(self.stdout, ResetColor, Clear(ClearType::All))?;

        let Some((top, left)) = grid_origin((term_cols, term_rows), rows.len(), frame.grid.cols())
        else {
            queue!(
                self.stdout,
                MoveTo(0, 0),
                Print(format!(
                    "Terminal too small: need {}x{}, have {}x{}",
                    frame.grid.cols(),
                    rows.len().saturating_add(FOOTER_ROWS as usize),
                    term_cols,
                    term_rows
                ))
            )?;
            self.stdout.flush()?;
            return Ok(());
        };
        let grid_rows = rows.len() as u16;

        for (r, row) in rows.iter().enumerate() {
            queue!(self.stdout, MoveTo(left, top + r as u16))?;
            for cell in row {
                queue!(
                    self.stdout,
                    SetForegroundColor(cell.tint.fg),
                    SetBackgroundColor(cell.tint.bg),
                    Print(cell.ch)
                )?;
            }
        }

        queue!(
            self.stdout,
            ResetColor,
            MoveTo(left, top + grid_rows),
            Print(status_line(frame)),
            MoveTo(0, top + grid_rows + 1),
            Print(&self.help)
        )?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Top-left corner that centres a grid and its footer in the terminal, or
/// `None` when they do not fit.
fn grid_origin(terminal: (u16, u16), grid_rows: usize, grid_cols: usize) -> Option<(u16, u16)> {
    let (term_cols, term_rows) = terminal;
    let rows = u16::try_from(grid_rows).ok()?.checked_add(FOOTER_ROWS)?;
    let cols = u16::try_from(grid_cols).ok()?;
    if rows > term_rows || cols > term_cols {
        return None;
    }
    Some(((term_rows - rows) / 2, (term_cols - cols) / 2))
}

impl Renderer for TerminalDisplay {
    fn render(&mut self, frame: &Frame<'_>) -> L1tResult<()> {
        self.draw(frame)
    }

    /// Clears the screen and prints the lines centred.
    fn show_banner(&mut self, lines: &[String]) -> L1tResult<()> {
        self.banner(lines)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        // Always give the terminal back, even when unwinding.
        let _ = execute!(
            self.stdout,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
