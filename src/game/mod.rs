//! # Game Module
//!
//! The grid simulation engine: cells, the grid they live in, and the engines
//! that mutate it each turn.
//!
//! This module contains the fundamental building blocks of L1t:
//! - Grid model and typed cell contents
//! - Beam engine (laser raycasting and mirror reflection)
//! - Movement and push resolution for the player
//! - Interaction toggling and win evaluation
//! - The level session that drives one level turn by turn

pub mod beam;
pub mod cell;
pub mod grid;
pub mod interaction;
pub mod movement;
pub mod rules;
pub mod state;

pub use beam::*;
pub use cell::*;
pub use grid::*;
pub use interaction::*;
pub use movement::*;
pub use rules::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// A coordinate on the grid. Row 0 is the top row, column 0 the leftmost.
///
/// # Examples
///
/// ```
/// use l1t::Position;
///
/// let pos = Position::new(2, 5);
/// assert_eq!(pos.row, 2);
/// assert_eq!(pos.col, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the position `steps` cells away in `direction`, or `None` when
    /// that would underflow past row or column 0.
    ///
    /// Upper bounds are the grid's business; see [`Grid::step`].
    pub fn offset(self, direction: Direction, steps: usize) -> Option<Position> {
        let (dr, dc) = direction.to_delta();
        let row = apply_delta(self.row, dr, steps)?;
        let col = apply_delta(self.col, dc, steps)?;
        Some(Position::new(row, col))
    }
}

fn apply_delta(value: usize, delta: i32, steps: usize) -> Option<usize> {
    match delta {
        0 => Some(value),
        d if d > 0 => value.checked_add(steps),
        _ => value.checked_sub(steps),
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four headings a player can move in and a beam can travel in.
///
/// There is no diagonal movement anywhere in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a `(row, column)` unit delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use l1t::Direction;
    ///
    /// assert_eq!(Direction::Up.to_delta(), (-1, 0));
    /// assert_eq!(Direction::Right.to_delta(), (0, 1));
    /// ```
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Heading after bouncing off a `/` mirror: Up and Right swap, Down and Left swap.
    pub fn reflect_forward(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Down,
        }
    }

    /// Heading after bouncing off a `\` mirror: Up and Left swap, Down and Right swap.
    pub fn reflect_backward(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Down,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Glyph drawn on a cell a beam passes through with this heading.
    pub fn beam_glyph(self) -> char {
        if self.is_vertical() {
            '|'
        } else {
            '-'
        }
    }

    /// Arrow glyph drawn at the tip of a beam with this heading.
    pub fn arrow_glyph(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}
