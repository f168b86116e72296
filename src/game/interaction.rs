//! # Interaction Engine
//!
//! Handles the interact command: every laser in the 3x3 block around the
//! player has its power flipped. Nothing else reacts to interaction.

use crate::game::{CellKind, Grid, Position};
use log::debug;

/// Toggles the powered flag of every laser adjacent to `player`, diagonals
/// included, and returns the positions that were toggled.
///
/// # Examples
///
/// ```
/// use l1t::{interact, Cell, CellKind, Direction, Grid, Position};
///
/// let mut grid = Grid::new(2, 2);
/// grid.put(Cell::new(0, 0, CellKind::Player));
/// grid.put(Cell::laser(1, 1, Direction::Up, false));
///
/// let toggled = interact(&mut grid, Position::new(0, 0));
/// assert_eq!(toggled, vec![Position::new(1, 1)]);
/// assert!(grid.get(Position::new(1, 1)).unwrap().is_lit());
/// ```
pub fn interact(grid: &mut Grid, player: Position) -> Vec<Position> {
    let mut toggled = Vec::new();
    for pos in grid.moore_neighbors(player) {
        let Some(cell) = grid.get_mut(pos) else {
            continue;
        };
        if cell.kind() == CellKind::Laser {
            let powered = cell.toggle_lit();
            debug!("Laser at {} toggled {}", pos, if powered { "on" } else { "off" });
            toggled.push(pos);
        }
    }
    toggled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction};

    #[test]
    fn test_toggles_every_adjacent_laser() {
        let mut grid = Grid::new(3, 3);
        grid.put(Cell::new(1, 1, CellKind::Player));
        grid.put(Cell::laser(0, 0, Direction::Right, true));
        grid.put(Cell::laser(2, 1, Direction::Down, false));

        let toggled = interact(&mut grid, Position::new(1, 1));
        assert_eq!(toggled.len(), 2);
        assert!(!grid.get(Position::new(0, 0)).unwrap().is_lit());
        assert!(grid.get(Position::new(2, 1)).unwrap().is_lit());

        // Interacting again restores both.
        interact(&mut grid, Position::new(1, 1));
        assert!(grid.get(Position::new(0, 0)).unwrap().is_lit());
        assert!(!grid.get(Position::new(2, 1)).unwrap().is_lit());
    }

    #[test]
    fn test_distant_lasers_untouched() {
        let mut grid = Grid::new(1, 4);
        grid.put(Cell::new(0, 0, CellKind::Player));
        grid.put(Cell::laser(0, 2, Direction::Left, true));

        assert!(interact(&mut grid, Position::new(0, 0)).is_empty());
        assert!(grid.get(Position::new(0, 2)).unwrap().is_lit());
    }

    #[test]
    fn test_other_kinds_ignore_interaction() {
        let mut grid = Grid::new(3, 3);
        grid.put(Cell::new(1, 1, CellKind::Player));
        grid.put(Cell::new(0, 1, CellKind::Button));
        grid.put(Cell::new(1, 0, CellKind::Switch));
        grid.put(Cell::new(1, 2, CellKind::Statue));
        let before = grid.clone();

        assert!(interact(&mut grid, Position::new(1, 1)).is_empty());
        assert_eq!(grid, before);
    }
}
