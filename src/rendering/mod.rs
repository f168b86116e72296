//! # Rendering Module
//!
//! Terminal rendering with crossterm.
//!
//! The game core hands a [`Frame`] to whatever implements [`Renderer`]. The
//! layout work (beam overlay, colours) lives in [`ui`] so it can be shared by
//! the terminal display and plain text output.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::Frame;
use crate::L1tResult;

/// Draws frames somewhere.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> L1tResult<()>;

    /// Shows a full-screen message between levels.
    fn show_banner(&mut self, lines: &[String]) -> L1tResult<()> {
        let _ = lines;
        Ok(())
    }
}

/// Keeps the plain text of every frame it is given.
///
/// Handy for headless runs and for checking what the player would see.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    frames: Vec<String>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame rendered so far, oldest first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> L1tResult<()> {
        self.frames.push(frame_to_text(frame));
        Ok(())
    }

    fn show_banner(&mut self, lines: &[String]) -> L1tResult<()> {
        self.frames.push(lines.join("\n"));
        Ok(())
    }
}
