//! # Rules
//!
//! Marker bookkeeping and the win condition.

use crate::game::{CellKind, Grid, Position};
use serde::{Deserialize, Serialize};

/// Positions of the cells decoded as markers when the level was loaded.
///
/// These are lookups into the grid, not owners. Markers cannot be pushed,
/// so the positions stay valid for the whole session; a restart rebuilds
/// them together with the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Statue positions in row-major order.
    pub statues: Vec<Position>,
    /// Reverse statue positions in row-major order.
    pub reverse_statues: Vec<Position>,
}

impl Markers {
    /// Collects marker positions from a grid in row-major order.
    pub fn scan(grid: &Grid) -> Self {
        Self {
            statues: grid.positions_of(CellKind::Statue),
            reverse_statues: grid.positions_of(CellKind::ReverseStatue),
        }
    }

    pub fn len(&self) -> usize {
        self.statues.len() + self.reverse_statues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns true iff every statue is lit and every reverse statue is unlit.
///
/// A level without markers is trivially won.
///
/// # Examples
///
/// ```
/// use l1t::{is_won, Cell, CellKind, Grid, Markers};
///
/// let mut grid = Grid::new(1, 2);
/// grid.put(Cell::new(0, 0, CellKind::Statue));
/// let markers = Markers::scan(&grid);
/// assert!(!is_won(&grid, &markers));
///
/// grid.get_mut(markers.statues[0]).unwrap().set_lit(true);
/// assert!(is_won(&grid, &markers));
/// ```
pub fn is_won(grid: &Grid, markers: &Markers) -> bool {
    let lit = |pos: &Position| grid.get(*pos).map(|cell| cell.is_lit());

    markers.statues.iter().all(|pos| lit(pos) == Some(true))
        && markers
            .reverse_statues
            .iter()
            .all(|pos| lit(pos) == Some(false))
}
