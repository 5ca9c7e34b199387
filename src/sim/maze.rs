//! Static maze grid
//!
//! The maze is parsed once from row strings and never mutated. Pickups are
//! read from the same layout but tracked by the round, not the grid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

/// Built-in layout. `1` wall, `.` dot, `O` energizer, `#` open floor.
pub const CLASSIC_LAYOUT: [&str; GRID_HEIGHT] = [
    "1111111111111111111111111111",
    "1............##............1",
    "1.1111.11111.##.11111.1111.1",
    "1O1111.11111.##.11111.1111O1",
    "1.1111.11111.##.11111.1111.1",
    "1..........................1",
    "1.1111.##.11111111.##.1111.1",
    "1.1111.##.11111111.##.1111.1",
    "1......##....##....##......1",
    "111111.11111.##.11111.111111",
    "111111.11111.##.11111.111111",
    "111111.##..........##.111111",
    "111111.##.111##111.##.111111",
    "111111.##.11111111.##.111111",
    "..........11111111..........",
    "111111.##.11111111.##.111111",
    "111111.##.11111111.##.111111",
    "111111.##..........##.111111",
    "111111.##.11111111.##.111111",
    "111111.##.11111111.##.111111",
    "1............##............1",
    "1.1111.11111.##.11111.1111.1",
    "1.1111.11111.##.11111.1111.1",
    "1O..##................##..O1",
    "111.##.##.11111111.##.##.111",
    "111.##.##.11111111.##.##.111",
    "1......##....##....##......1",
    "1.1111111111.##.1111111111.1",
    "1.1111111111.##.1111111111.1",
    "1..........................1",
    "1111111111111111111111111111",
];

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Open,
}

/// Malformed maze layout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row}: expected {expected} columns, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column {col}: unknown tile {ch:?}")]
    UnknownTile { row: usize, col: usize, ch: char },
}

/// Immutable wall/open lookup plus the initial pickup layout.
/// Serialized as its row strings so a loaded maze is always validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Maze {
    tiles: Vec<Tile>,
    dots: Vec<(i32, i32)>,
    energizers: Vec<(i32, i32)>,
}

impl Maze {
    /// The built-in layout
    pub fn classic() -> Self {
        Self::build(&CLASSIC_LAYOUT)
    }

    /// Parse a layout, rejecting anything that is not exactly
    /// `GRID_WIDTH` x `GRID_HEIGHT` of known tile characters
    pub fn from_rows(rows: &[&str]) -> Result<Self, MazeError> {
        if rows.len() != GRID_HEIGHT {
            return Err(MazeError::RowCount {
                expected: GRID_HEIGHT,
                found: rows.len(),
            });
        }
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != GRID_WIDTH {
                return Err(MazeError::RowWidth {
                    row,
                    expected: GRID_WIDTH,
                    found: width,
                });
            }
            if let Some((col, ch)) = line
                .chars()
                .enumerate()
                .find(|&(_, ch)| !matches!(ch, '1' | '.' | 'O' | '#' | ' '))
            {
                return Err(MazeError::UnknownTile { row, col, ch });
            }
        }
        Ok(Self::build(rows))
    }

    fn build(rows: &[&str]) -> Self {
        let mut tiles = Vec::with_capacity(GRID_WIDTH * GRID_HEIGHT);
        let mut dots = Vec::new();
        let mut energizers = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = (col as i32, row as i32);
                match ch {
                    '1' => tiles.push(Tile::Wall),
                    '.' => {
                        dots.push(cell);
                        tiles.push(Tile::Open);
                    }
                    'O' => {
                        energizers.push(cell);
                        tiles.push(Tile::Open);
                    }
                    _ => tiles.push(Tile::Open),
                }
            }
        }

        Self {
            tiles,
            dots,
            energizers,
        }
    }

    /// Whether a cell is in range
    #[inline]
    pub fn in_bounds(col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < GRID_WIDTH && (row as usize) < GRID_HEIGHT
    }

    /// Out-of-range cells are never walls (the side tunnel wraps)
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        if !Self::in_bounds(col, row) {
            return false;
        }
        self.tiles[row as usize * GRID_WIDTH + col as usize] == Tile::Wall
    }

    /// Initial dot cells, in layout order
    pub fn dots(&self) -> &[(i32, i32)] {
        &self.dots
    }

    /// Initial energizer cells, in layout order
    pub fn energizers(&self) -> &[(i32, i32)] {
        &self.energizers
    }

    /// Layout row strings, with pickups at their initial cells
    pub fn rows(&self) -> Vec<String> {
        (0..GRID_HEIGHT as i32)
            .map(|row| {
                (0..GRID_WIDTH as i32)
                    .map(|col| {
                        let cell = (col, row);
                        if self.is_wall(col, row) {
                            '1'
                        } else if self.energizers.contains(&cell) {
                            'O'
                        } else if self.dots.contains(&cell) {
                            '.'
                        } else {
                            '#'
                        }
                    })
                    .collect::<String>()
            })
            .collect()
    }

    /// Iterate over all wall cells (for draw data)
    pub fn walls(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, t)| {
            (*t == Tile::Wall).then(|| ((i % GRID_WIDTH) as i32, (i / GRID_WIDTH) as i32))
        })
    }
}

impl From<Maze> for Vec<String> {
    fn from(maze: Maze) -> Self {
        maze.rows()
    }
}

impl TryFrom<Vec<String>> for Maze {
    type Error = MazeError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        Self::from_rows(&rows)
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::classic()
    }
}
