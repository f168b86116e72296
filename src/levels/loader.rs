//! # Level Loader
//!
//! Decodes a rectangular character matrix into a populated grid, the
//! player's starting position and the marker lists.
//!
//! | char | kind | facing | powered / lit |
//! |---|---|---|---|
//! | `I` | Wall | | |
//! | `X` | Player | | |
//! | `/` | MirrorForward | | |
//! | `\` | MirrorBackward | | |
//! | `K` | Block | | |
//! | `S` | Statue | | off |
//! | `R` | ReverseStatue | | |
//! | `1`-`4` | Laser | Up, Down, Left, Right | on |
//! | `5`-`8` | Laser | Up, Down, Left, Right | off |
//! | anything else | Empty | | |

use crate::game::{Cell, CellKind, Direction, Grid, Markers, Position};
use std::path::PathBuf;

/// Reasons a level cannot be started.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The level file could not be read
    #[error("cannot read level {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No rows at all
    #[error("level is empty")]
    Empty,

    /// A row whose width differs from the first row
    #[error("row {row} is {found} characters wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// No `X` anywhere in the level
    #[error("level has no player")]
    MissingPlayer,

    /// More than one `X`
    #[error("level has a second player at {second}, first one at {first}")]
    MultiplePlayers { first: Position, second: Position },

    /// A built-in level index that does not exist
    #[error("there is no built-in level {0}")]
    UnknownBuiltin(usize),
}

/// The result of decoding a level: everything a session needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLevel {
    pub grid: Grid,
    pub player: Position,
    pub markers: Markers,
}

/// Decodes one character into the cell it stands for.
pub fn decode_cell(ch: char, row: usize, col: usize) -> Cell {
    let laser = |facing, powered| Cell::laser(row, col, facing, powered);
    match ch {
        'I' => Cell::new(row, col, CellKind::Wall),
        'X' => Cell::new(row, col, CellKind::Player),
        '/' => Cell::new(row, col, CellKind::MirrorForward),
        '\\' => Cell::new(row, col, CellKind::MirrorBackward),
        'K' => Cell::new(row, col, CellKind::Block),
        'S' => Cell::new(row, col, CellKind::Statue),
        'R' => Cell::new(row, col, CellKind::ReverseStatue),
        '1' => laser(Direction::Up, true),
        '2' => laser(Direction::Down, true),
        '3' => laser(Direction::Left, true),
        '4' => laser(Direction::Right, true),
        '5' => laser(Direction::Up, false),
        '6' => laser(Direction::Down, false),
        '7' => laser(Direction::Left, false),
        '8' => laser(Direction::Right, false),
        _ => Cell::empty(row, col),
    }
}

/// The inverse of [`decode_cell`] where one exists.
///
/// Kinds the decoding table has no character for are written with their
/// display glyph.
pub fn encode_cell(cell: &Cell) -> char {
    match (cell.kind(), cell.facing()) {
        (CellKind::Laser, Some(facing)) => {
            let base = match facing {
                Direction::Up => 1,
                Direction::Down => 2,
                Direction::Left => 3,
                Direction::Right => 4,
            };
            let digit = if cell.is_lit() { base } else { base + 4 };
            char::from_digit(digit, 10).unwrap_or('L')
        }
        (kind, _) => kind.glyph(),
    }
}

/// Splits level text into rows, dropping `\n` / `\r\n` terminators and any
/// trailing blank lines.
pub fn split_rows(text: &str) -> Vec<&str> {
    let mut rows: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}

/// Decodes level text.
///
/// # Examples
///
/// ```
/// use l1t::{decode_level, Position};
///
/// let level = decode_level("IIII\nIXSI\nIIII\n").unwrap();
/// assert_eq!(level.grid.rows(), 3);
/// assert_eq!(level.grid.cols(), 4);
/// assert_eq!(level.player, Position::new(1, 1));
/// assert_eq!(level.markers.statues, vec![Position::new(1, 2)]);
/// ```
pub fn decode_level(text: &str) -> Result<DecodedLevel, LoadError> {
    decode_rows(&split_rows(text))
}

/// Decodes an already split character matrix.
pub fn decode_rows(rows: &[&str]) -> Result<DecodedLevel, LoadError> {
    let first = rows.first().ok_or(LoadError::Empty)?;
    let cols = first.chars().count();
    if cols == 0 {
        return Err(LoadError::Empty);
    }

    let mut grid = Grid::new(rows.len(), cols);
    let mut player: Option<Position> = None;

    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != cols {
            return Err(LoadError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }

        for (col, ch) in line.chars().enumerate() {
            let cell = decode_cell(ch, row, col);
            if cell.kind() == CellKind::Player {
                let here = cell.position();
                if let Some(first) = player {
                    return Err(LoadError::MultiplePlayers {
                        first,
                        second: here,
                    });
                }
                player = Some(here);
            }
            grid.put(cell);
        }
    }

    let player = player.ok_or(LoadError::MissingPlayer)?;
    let markers = Markers::scan(&grid);

    Ok(DecodedLevel {
        grid,
        player,
        markers,
    })
}
