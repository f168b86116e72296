//! # User Interface Elements
//!
//! Turns a [`Frame`] into coloured screen cells: the cell palette, the beam
//! overlay and the status text.

use crate::game::{Cell, CellKind, Frame, SessionState};
use crossterm::style::Color;

/// Foreground and background for one screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub fg: Color,
    pub bg: Color,
}

impl Tint {
    const fn solid(color: Color) -> Self {
        Self {
            fg: color,
            bg: color,
        }
    }

    const fn plain(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Reset,
        }
    }
}

/// Colour of beam lines and arrows.
pub const BEAM_TINT: Tint = Tint::plain(Color::Red);

/// One character on screen with its colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCell {
    pub ch: char,
    pub tint: Tint,
}

/// Palette for a grid cell.
///
/// Walls, blocks and the player draw as solid squares; markers change
/// colour with their lit flag and lasers dim when unpowered.
pub fn cell_tint(cell: &Cell) -> Tint {
    match cell.kind() {
        CellKind::Empty => Tint::plain(Color::Reset),
        CellKind::Player => Tint::solid(Color::Green),
        CellKind::Wall => Tint::solid(Color::White),
        CellKind::Block => Tint::solid(Color::Grey),
        CellKind::MirrorForward | CellKind::MirrorBackward => Tint::plain(Color::White),
        CellKind::Statue if cell.is_lit() => Tint::solid(Color::Yellow),
        CellKind::Statue => Tint::solid(Color::DarkYellow),
        CellKind::ReverseStatue if cell.is_lit() => Tint::solid(Color::Magenta),
        CellKind::ReverseStatue => Tint::solid(Color::DarkMagenta),
        CellKind::ToggleBlock => Tint::solid(Color::Blue),
        CellKind::Button | CellKind::Switch => Tint {
            fg: Color::Yellow,
            bg: Color::Red,
        },
        CellKind::Laser if cell.is_lit() => Tint::solid(Color::Red),
        CellKind::Laser => Tint::solid(Color::DarkRed),
    }
}

/// Character for a grid cell. Lasers show which way they point.
pub fn cell_char(cell: &Cell) -> char {
    match (cell.kind(), cell.facing()) {
        (CellKind::Laser, Some(facing)) => facing.arrow_glyph(),
        (kind, _) => kind.glyph(),
    }
}

/// Lays out the grid with every beam drawn over the empty cells it crosses.
///
/// # Examples
///
/// ```
/// use l1t::{compose, LevelInfo, LevelSession, LevelSource};
///
/// let info = LevelInfo::from_source(LevelSource::Builtin(0));
/// let mut session = LevelSession::from_text(info, "4  S\nX   \n".into()).unwrap();
/// session.run_beams();
///
/// let rows = compose(&session.frame());
/// let top: String = rows[0].iter().map(|c| c.ch).collect();
/// assert_eq!(top, ">->S");
/// ```
pub fn compose(frame: &Frame<'_>) -> Vec<Vec<ScreenCell>> {
    let grid = frame.grid;
    let mut rows: Vec<Vec<ScreenCell>> = (0..grid.rows())
        .map(|_| Vec::with_capacity(grid.cols()))
        .collect();

    for cell in grid.cells() {
        if let Some(row) = rows.get_mut(cell.row) {
            row.push(ScreenCell {
                ch: cell_char(cell),
                tint: cell_tint(cell),
            });
        }
    }

    for trace in frame.beams {
        for segment in &trace.segments {
            let pos = segment.position;
            if let Some(slot) = rows.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
                *slot = ScreenCell {
                    ch: trace.glyph_for(segment),
                    tint: BEAM_TINT,
                };
            }
        }
    }

    rows
}

/// The composed grid as plain text, one line per row.
pub fn frame_to_text(frame: &Frame<'_>) -> String {
    compose(frame)
        .iter()
        .map(|row| row.iter().map(|cell| cell.ch).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Level name, turn count and progress.
pub fn status_line(frame: &Frame<'_>) -> String {
    let state = match frame.state {
        SessionState::Playing => "",
        SessionState::Won => "  solved!",
        SessionState::Quit => "  left",
    };
    format!("{}  turn {}{}", frame.level.name, frame.turn, state)
}
