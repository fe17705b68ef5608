use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Coord;

/// Side length of the square board.
pub const GRID_SIZE: i32 = 10;

const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Unknown,
    Empty,
    Player,
    Obstacle,
    Coin,
}

impl Cell {
    /// Search may step onto every cell except obstacles.
    pub fn is_traversable(self) -> bool {
        self != Cell::Obstacle
    }

    pub fn is_target(self) -> bool {
        self == Cell::Coin
    }

    /// Single-character map glyph.
    pub fn glyph(self) -> char {
        match self {
            Cell::Unknown => 'N',
            Cell::Empty => '.',
            Cell::Player => 'P',
            Cell::Obstacle => 'O',
            Cell::Coin => 'C',
        }
    }
}

/// Fixed 10×10 board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// A board with every cell `Unknown`.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Unknown; CELL_COUNT],
        }
    }

    pub fn in_bounds(coord: Coord) -> bool {
        coord.row >= 0 && coord.col >= 0 && coord.row < GRID_SIZE && coord.col < GRID_SIZE
    }

    /// Row-major index of `coord`, or `None` off the board.
    pub fn index(coord: Coord) -> Option<usize> {
        if !Self::in_bounds(coord) {
            return None;
        }
        Some((coord.row * GRID_SIZE + coord.col) as usize)
    }

    pub fn coord_at(index: usize) -> Coord {
        let index = index as i32;
        Coord::new(index / GRID_SIZE, index % GRID_SIZE)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        Self::index(coord).map(|idx| self.cells[idx])
    }

    /// Write `cell` at `coord`. Returns `false` (and writes nothing) off the board.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match Self::index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Out-of-bounds coordinates count as blocked.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Cell::is_traversable)
    }

    /// Coordinates of every cell currently marked `cell`, in row-major order.
    pub fn find(&self, cell: Cell) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(|(idx, _)| Self::coord_at(idx))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            let line: Vec<String> = (0..GRID_SIZE)
                .map(|col| {
                    let cell = self.get(Coord::new(row, col)).unwrap_or_default();
                    cell.glyph().to_string()
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
