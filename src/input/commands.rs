//! # Command Definitions
//!
//! The abstract commands the game core understands. Mapping physical keys to
//! commands happens in [`crate::input::InputHandler`].

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// One player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Toggle adjacent lasers
    Interact,
    /// Reload the current level from scratch
    Restart,
    /// Leave the current level
    Quit,
    /// Anything unrecognised; still ends the turn
    Noop,
}

impl Command {
    /// Creates the move command for a direction.
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Up => Command::MoveUp,
            Direction::Down => Command::MoveDown,
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
        }
    }

    /// The direction of a move command.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::Interact | Command::Restart | Command::Quit | Command::Noop => None,
        }
    }
}
