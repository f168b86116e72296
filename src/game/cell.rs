//! # Cells
//!
//! The unit of grid state and the closed set of things a cell can hold.

use crate::game::{Direction, Position};
use serde::{Deserialize, Serialize};

/// What occupies a cell.
///
/// `ToggleBlock`, `Button` and `Switch` are recognised kinds with no engine
/// behaviour: they block movement and beams and ignore interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Player,
    Wall,
    /// `/`
    MirrorForward,
    /// `\`
    MirrorBackward,
    Block,
    /// Marker satisfied while a beam lights it.
    Statue,
    /// Marker satisfied while a beam hits it (its lit flag is cleared by the hit).
    ReverseStatue,
    ToggleBlock,
    Button,
    Switch,
    Laser,
}

impl CellKind {
    /// Display glyph for the kind. Lasers draw as `L` regardless of facing.
    pub fn glyph(self) -> char {
        match self {
            CellKind::Empty => ' ',
            CellKind::Player => 'X',
            CellKind::Wall => 'I',
            CellKind::MirrorForward => '/',
            CellKind::MirrorBackward => '\\',
            CellKind::Block => 'K',
            CellKind::Statue => 'S',
            CellKind::ReverseStatue => 'R',
            CellKind::ToggleBlock => 'T',
            CellKind::Button => 'B',
            CellKind::Switch => 'W',
            CellKind::Laser => 'L',
        }
    }

    /// Kinds the player can shove one cell ahead.
    pub fn is_pushable(self) -> bool {
        matches!(
            self,
            CellKind::Block | CellKind::MirrorForward | CellKind::MirrorBackward
        )
    }

    /// Kinds a beam keeps travelling through (possibly turning).
    pub fn is_beam_transparent(self) -> bool {
        matches!(
            self,
            CellKind::Empty | CellKind::MirrorForward | CellKind::MirrorBackward
        )
    }
}

/// One grid cell.
///
/// The row and column are stored alongside the contents so a cell handed out
/// on its own still knows where it sits. `facing` is only ever `Some` for
/// lasers. `lit` is the powered flag for lasers and the satisfied flag for
/// statues; other kinds keep it `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    kind: CellKind,
    facing: Option<Direction>,
    lit: bool,
}

impl Cell {
    /// Creates an empty cell at the given coordinates.
    pub fn empty(row: usize, col: usize) -> Self {
        Self::new(row, col, CellKind::Empty)
    }

    /// Creates a cell of the given kind with no facing and the lit flag off.
    pub fn new(row: usize, col: usize, kind: CellKind) -> Self {
        Self {
            row,
            col,
            kind,
            facing: None,
            lit: false,
        }
    }

    /// Creates a laser cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use l1t::{Cell, CellKind, Direction};
    ///
    /// let laser = Cell::laser(0, 3, Direction::Down, true);
    /// assert_eq!(laser.kind(), CellKind::Laser);
    /// assert_eq!(laser.facing(), Some(Direction::Down));
    /// assert!(laser.is_lit());
    /// ```
    pub fn laser(row: usize, col: usize, facing: Direction, powered: bool) -> Self {
        Self {
            row,
            col,
            kind: CellKind::Laser,
            facing: Some(facing),
            lit: powered,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Glyph derived from the cell kind.
    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn facing(&self) -> Option<Direction> {
        self.facing
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
    }

    /// Flips the lit flag and returns the new value.
    pub fn toggle_lit(&mut self) -> bool {
        self.lit = !self.lit;
        self.lit
    }

    /// Replaces the contents with a kind that carries no facing, clearing
    /// the lit flag. Used by the movement engine's type swaps.
    pub fn replace_kind(&mut self, kind: CellKind) {
        self.kind = kind;
        self.facing = None;
        self.lit = false;
    }
}
