//! # Movement Engine
//!
//! Resolves a single step request for the player, including one-cell pushes.

use crate::game::{CellKind, Direction, Grid, Position};
use log::debug;
use serde::{Deserialize, Serialize};

/// What a move request did.
///
/// A rejected move is a normal outcome, not an error: the grid is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player stepped into an empty cell.
    Stepped { to: Position },
    /// The player pushed a block or mirror from `to` to `object_to`.
    Pushed {
        to: Position,
        object: CellKind,
        object_to: Position,
    },
    /// Nothing changed.
    Blocked,
}

impl MoveOutcome {
    /// The player's new position, if the move went through.
    pub fn new_position(self) -> Option<Position> {
        match self {
            MoveOutcome::Stepped { to } | MoveOutcome::Pushed { to, .. } => Some(to),
            MoveOutcome::Blocked => None,
        }
    }

    pub fn moved(self) -> bool {
        self != MoveOutcome::Blocked
    }
}

/// Moves the player at `player` one cell in `direction`.
///
/// - Empty target: the player steps into it.
/// - Block or mirror target: pushed one cell further if that cell exists and
///   is empty, with the player following; otherwise blocked.
/// - Anything else, or off the grid: blocked.
///
/// # Examples
///
/// ```
/// use l1t::{move_player, Cell, CellKind, Direction, Grid, MoveOutcome, Position};
///
/// let mut grid = Grid::new(1, 3);
/// grid.put(Cell::new(0, 0, CellKind::Player));
/// grid.put(Cell::new(0, 1, CellKind::Block));
///
/// let outcome = move_player(&mut grid, Position::new(0, 0), Direction::Right);
/// assert_eq!(outcome.new_position(), Some(Position::new(0, 1)));
/// assert_eq!(grid.kind_at(Position::new(0, 2)), Some(CellKind::Block));
/// ```
pub fn move_player(grid: &mut Grid, player: Position, direction: Direction) -> MoveOutcome {
    let Some(target) = grid.step(player, direction, 1) else {
        return MoveOutcome::Blocked;
    };
    let Some(target_kind) = grid.kind_at(target) else {
        return MoveOutcome::Blocked;
    };

    let outcome = match target_kind {
        CellKind::Empty => {
            grid.set_kind(target, CellKind::Player);
            grid.set_kind(player, CellKind::Empty);
            MoveOutcome::Stepped { to: target }
        }
        kind if kind.is_pushable() => match grid.step(player, direction, 2) {
            Some(beyond) if grid.kind_at(beyond) == Some(CellKind::Empty) => {
                grid.set_kind(beyond, kind);
                grid.set_kind(target, CellKind::Player);
                grid.set_kind(player, CellKind::Empty);
                MoveOutcome::Pushed {
                    to: target,
                    object: kind,
                    object_to: beyond,
                }
            }
            _ => MoveOutcome::Blocked,
        },
        _ => MoveOutcome::Blocked,
    };

    debug!("Move {:?} from {}: {:?}", direction, player, outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn grid_with_player(rows: usize, cols: usize, player: Position) -> Grid {
        let mut grid = Grid::new(rows, cols);
        grid.set_kind(player, CellKind::Player);
        grid
    }

    #[test]
    fn test_step_into_empty() {
        let start = Position::new(1, 1);
        let mut grid = grid_with_player(3, 3, start);
        let outcome = move_player(&mut grid, start, Direction::Up);

        assert_eq!(outcome, MoveOutcome::Stepped { to: Position::new(0, 1) });
        assert_eq!(grid.kind_at(start), Some(CellKind::Empty));
        assert_eq!(grid.positions_of(CellKind::Player), vec![Position::new(0, 1)]);
    }

    #[test]
    fn test_edge_of_grid_blocks() {
        let start = Position::new(0, 0);
        let mut grid = grid_with_player(2, 2, start);
        let before = grid.clone();

        assert_eq!(move_player(&mut grid, start, Direction::Up), MoveOutcome::Blocked);
        assert_eq!(move_player(&mut grid, start, Direction::Left), MoveOutcome::Blocked);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_push_mirror_keeps_its_kind() {
        let start = Position::new(0, 0);
        let mut grid = grid_with_player(1, 3, start);
        grid.put(Cell::new(0, 1, CellKind::MirrorBackward));

        let outcome = move_player(&mut grid, start, Direction::Right);
        assert!(outcome.moved());
        assert_eq!(grid.kind_at(Position::new(0, 2)), Some(CellKind::MirrorBackward));
        assert_eq!(grid.kind_at(Position::new(0, 1)), Some(CellKind::Player));
        assert_eq!(grid.kind_at(start), Some(CellKind::Empty));
    }

    #[test]
    fn test_push_against_edge_is_blocked() {
        let start = Position::new(0, 1);
        let mut grid = grid_with_player(1, 3, start);
        grid.put(Cell::new(0, 2, CellKind::Block));
        let before = grid.clone();

        assert_eq!(move_player(&mut grid, start, Direction::Right), MoveOutcome::Blocked);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_push_chain_of_two_is_blocked() {
        let start = Position::new(0, 0);
        let mut grid = grid_with_player(1, 4, start);
        grid.put(Cell::new(0, 1, CellKind::Block));
        grid.put(Cell::new(0, 2, CellKind::MirrorForward));
        let before = grid.clone();

        assert_eq!(move_player(&mut grid, start, Direction::Right), MoveOutcome::Blocked);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_immovable_kinds_block() {
        for kind in [
            CellKind::Wall,
            CellKind::Statue,
            CellKind::ReverseStatue,
            CellKind::ToggleBlock,
            CellKind::Button,
            CellKind::Switch,
        ] {
            let start = Position::new(0, 0);
            let mut grid = grid_with_player(1, 3, start);
            grid.put(Cell::new(0, 1, kind));
            let before = grid.clone();

            assert_eq!(
                move_player(&mut grid, start, Direction::Right),
                MoveOutcome::Blocked,
                "{:?} should not be enterable",
                kind
            );
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn test_laser_is_not_pushable() {
        let start = Position::new(0, 0);
        let mut grid = grid_with_player(1, 3, start);
        grid.put(Cell::laser(0, 1, Direction::Up, true));
        let before = grid.clone();

        assert_eq!(move_player(&mut grid, start, Direction::Right), MoveOutcome::Blocked);
        assert_eq!(grid, before);
    }
}
