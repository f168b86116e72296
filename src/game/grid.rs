//! # Grid
//!
//! The rectangular, row-major store that exclusively owns every cell of a level.

use crate::game::{Cell, CellKind, Direction, Position};
use serde::{Deserialize, Serialize};

/// A fixed-size rectangle of cells.
///
/// Dimensions never change for the lifetime of a level. Everything else in
/// the engine refers to cells by [`Position`]; nothing holds references into
/// the grid between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of empty cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use l1t::{CellKind, Grid, Position};
    ///
    /// let grid = Grid::new(3, 4);
    /// assert_eq!(grid.rows(), 3);
    /// assert_eq!(grid.cols(), 4);
    /// assert_eq!(grid.kind_at(Position::new(2, 3)), Some(CellKind::Empty));
    /// assert_eq!(grid.kind_at(Position::new(3, 0)), None);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::empty(row, col)))
            .collect();
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the position lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    pub fn kind_at(&self, pos: Position) -> Option<CellKind> {
        self.get(pos).map(Cell::kind)
    }

    /// Stores `cell` at its own coordinates. Out-of-bounds cells are ignored.
    pub fn put(&mut self, cell: Cell) {
        if let Some(slot) = self.get_mut(cell.position()) {
            *slot = cell;
        }
    }

    /// Sets the kind at `pos` via [`Cell::replace_kind`].
    pub fn set_kind(&mut self, pos: Position, kind: CellKind) {
        if let Some(cell) = self.get_mut(pos) {
            cell.replace_kind(kind);
        }
    }

    /// The in-bounds position `steps` cells from `pos` in `direction`.
    pub fn step(&self, pos: Position, direction: Direction, steps: usize) -> Option<Position> {
        pos.offset(direction, steps).filter(|p| self.contains(*p))
    }

    /// The up-to-8 in-bounds cells surrounding `pos`, in row-major order.
    pub fn moore_neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);
        for row in pos.row.saturating_sub(1)..=pos.row + 1 {
            for col in pos.col.saturating_sub(1)..=pos.col + 1 {
                let candidate = Position::new(row, col);
                if candidate != pos && self.contains(candidate) {
                    neighbors.push(candidate);
                }
            }
        }
        neighbors
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Positions of every cell of `kind`, in row-major order.
    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.kind() == kind)
            .map(Cell::position)
            .collect()
    }

    /// Renders the grid back into the level text format, one line per row.
    ///
    /// Lasers are written with the digit that decodes to the same facing and
    /// powered state.
    pub fn to_level_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.cols == 0 {
                out.push('\n');
            }
            out.push(crate::levels::encode_cell(cell));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation_size() {
        let grid = Grid::new(4, 6);
        assert_eq!(grid.cells().count(), 24);
        assert!(grid.cells().all(|c| c.kind() == CellKind::Empty));
    }

    #[test]
    fn test_cells_know_their_coordinates() {
        let grid = Grid::new(3, 3);
        for cell in grid.cells() {
            assert_eq!(grid.get(cell.position()), Some(cell));
        }
    }

    #[test]
    fn test_step_respects_bounds() {
        let grid = Grid::new(3, 3);
        let corner = Position::new(2, 2);
        assert_eq!(grid.step(corner, Direction::Down, 1), None);
        assert_eq!(grid.step(corner, Direction::Right, 1), None);
        assert_eq!(grid.step(corner, Direction::Up, 2), Some(Position::new(0, 2)));
        assert_eq!(grid.step(corner, Direction::Up, 3), None);
    }

    #[test]
    fn test_moore_neighbors_interior() {
        let grid = Grid::new(5, 5);
        let neighbors = grid.moore_neighbors(Position::new(2, 2));
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Position::new(2, 2)));
        assert!(neighbors.contains(&Position::new(1, 1)));
        assert!(neighbors.contains(&Position::new(3, 3)));
    }

    #[test]
    fn test_moore_neighbors_clipped_at_corner() {
        let grid = Grid::new(5, 5);
        let neighbors = grid.moore_neighbors(Position::new(0, 0));
        assert_eq!(
            neighbors,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_put_and_set_kind() {
        let mut grid = Grid::new(2, 2);
        grid.put(Cell::laser(1, 1, Direction::Left, true));
        assert_eq!(grid.kind_at(Position::new(1, 1)), Some(CellKind::Laser));

        grid.set_kind(Position::new(1, 1), CellKind::Block);
        let cell = grid.get(Position::new(1, 1)).unwrap();
        assert_eq!(cell.kind(), CellKind::Block);
        assert_eq!(cell.facing(), None);

        // Out of bounds writes are dropped.
        grid.put(Cell::new(5, 5, CellKind::Wall));
        assert_eq!(grid.positions_of(CellKind::Wall), vec![]);
    }
}
