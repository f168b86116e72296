//! # Beam Engine
//!
//! Recomputes every powered laser's path and applies what each beam ends on.
//!
//! A pass is never incremental. Pushed blocks and mirrors change paths
//! between turns, so every pass first puts the markers back into their
//! default posture (statues unlit, reverse statues lit) and then fires every
//! powered laser from scratch. A marker no longer reached by a beam therefore
//! falls back to its default.
//!
//! Lasers fire in row-major order. A laser switched off by an earlier beam in
//! the same pass does not fire, and stays off until the player toggles it.

use crate::config::BEAM_STEP_GUARD_FACTOR;
use crate::game::{CellKind, Direction, Grid, Markers, Position};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One empty cell a beam crosses, with the heading it crosses it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamSegment {
    pub position: Position,
    pub heading: Direction,
}

impl BeamSegment {
    /// `|` or `-` depending on the heading.
    pub fn line_glyph(&self) -> char {
        self.heading.beam_glyph()
    }
}

/// The full path of one laser's beam for the current pass.
///
/// Only empty cells appear in `segments`; mirrors turn the beam but are not
/// drawn over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamTrace {
    /// The laser that fired.
    pub origin: Position,
    /// Empty cells crossed, in travel order.
    pub segments: Vec<BeamSegment>,
    /// The cell the beam stopped on, `None` if it left the grid.
    pub terminus: Option<Position>,
    /// Where the arrow is drawn: the last crossed cell, present only when the
    /// beam stopped right after crossing an empty cell.
    pub tip: Option<BeamSegment>,
}

impl BeamTrace {
    /// Glyph to draw for a crossed cell: the arrow at the tip, the line elsewhere.
    pub fn glyph_for(&self, segment: &BeamSegment) -> char {
        match self.tip {
            Some(tip) if tip == *segment => segment.heading.arrow_glyph(),
            _ => segment.line_glyph(),
        }
    }

    pub fn crosses(&self, pos: Position) -> bool {
        self.segments.iter().any(|s| s.position == pos)
    }
}

/// Puts every marker back into its default posture: statues off, reverse statues on.
pub fn reset_markers(grid: &mut Grid, markers: &Markers) {
    for pos in &markers.statues {
        if let Some(cell) = grid.get_mut(*pos) {
            cell.set_lit(false);
        }
    }
    for pos in &markers.reverse_statues {
        if let Some(cell) = grid.get_mut(*pos) {
            cell.set_lit(true);
        }
    }
}

/// Follows a beam leaving `origin` heading `facing` until it stops.
///
/// This only reads the grid; the terminal effect is applied separately.
///
/// # Examples
///
/// ```
/// use l1t::{trace_beam, Cell, CellKind, Direction, Grid, Position};
///
/// let mut grid = Grid::new(1, 4);
/// grid.put(Cell::laser(0, 0, Direction::Right, true));
/// grid.put(Cell::new(0, 3, CellKind::Statue));
///
/// let trace = trace_beam(&grid, Position::new(0, 0), Direction::Right);
/// assert_eq!(trace.segments.len(), 2);
/// assert_eq!(trace.terminus, Some(Position::new(0, 3)));
/// ```
pub fn trace_beam(grid: &Grid, origin: Position, facing: Direction) -> BeamTrace {
    let mut segments = Vec::new();
    let mut heading = facing;
    let mut current = grid.step(origin, heading, 1);
    let mut last_was_empty = false;

    // Each (cell, heading) pair can be visited at most once on a real path;
    // the guard only protects against a corrupted grid.
    let max_steps = grid.rows() * grid.cols() * BEAM_STEP_GUARD_FACTOR;
    let mut steps = 0;

    while let Some(pos) = current {
        let kind = match grid.kind_at(pos) {
            Some(kind) if kind.is_beam_transparent() => kind,
            _ => break,
        };

        steps += 1;
        if steps > max_steps {
            warn!("Beam from {} exceeded {} steps, cutting it", origin, max_steps);
            current = None;
            break;
        }

        match kind {
            CellKind::MirrorForward => {
                heading = heading.reflect_forward();
                last_was_empty = false;
            }
            CellKind::MirrorBackward => {
                heading = heading.reflect_backward();
                last_was_empty = false;
            }
            _ => {
                segments.push(BeamSegment {
                    position: pos,
                    heading,
                });
                last_was_empty = true;
            }
        }
        current = grid.step(pos, heading, 1);
    }

    let tip = if last_was_empty {
        segments.last().copied()
    } else {
        None
    };

    BeamTrace {
        origin,
        segments,
        terminus: current,
        tip,
    }
}

/// Applies what a beam does to the cell it stopped on.
///
/// Statues light up, reverse statues go dark, lasers lose power. Anything
/// else simply stops the beam.
pub fn apply_terminal_effect(grid: &mut Grid, terminus: Position) {
    let Some(cell) = grid.get_mut(terminus) else {
        return;
    };
    match cell.kind() {
        CellKind::Statue => cell.set_lit(true),
        CellKind::ReverseStatue => cell.set_lit(false),
        CellKind::Laser => {
            debug!("Laser at {} switched off by a beam", terminus);
            cell.set_lit(false);
        }
        _ => {}
    }
}

/// Fires every powered laser once, in row-major order, applying each
/// terminal effect before the next laser fires.
pub fn fire_lasers(grid: &mut Grid) -> Vec<BeamTrace> {
    let lasers = grid.positions_of(CellKind::Laser);
    let mut traces = Vec::with_capacity(lasers.len());

    for origin in lasers {
        let Some(cell) = grid.get(origin) else {
            continue;
        };
        if !cell.is_lit() {
            continue;
        }
        let Some(facing) = cell.facing() else {
            continue;
        };

        let trace = trace_beam(grid, origin, facing);
        if let Some(terminus) = trace.terminus {
            apply_terminal_effect(grid, terminus);
        }
        traces.push(trace);
    }

    traces
}

/// One complete beam pass: reset marker defaults, then fire every laser.
pub fn beam_pass(grid: &mut Grid, markers: &Markers) -> Vec<BeamTrace> {
    reset_markers(grid, markers);
    let traces = fire_lasers(grid);
    debug!("Beam pass produced {} active beams", traces.len());
    traces
}
