//! Grid geometry
//!
//! The playfield is a fixed torus of cells: leaving one edge re-enters on the
//! opposite edge. There are no walls.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by a raw offset (not wrapped)
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance (king moves) between two cells
    #[inline]
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Heading of the cat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Not moving yet (only before the first move)
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four movement directions
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction (screen coordinates, y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if `self` would turn straight back onto `current`
    pub fn is_reverse_of(self, current: Direction) -> bool {
        self != Direction::None && self.opposite() == current
    }
}

/// Addressable cell space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must have at least one cell");
        Self { width, height }
    }

    /// Wrap a cell that stepped at most one cell past an edge
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(
            wrap_axis(cell.x, self.width),
            wrap_axis(cell.y, self.height),
        )
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    /// Uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }
}

fn wrap_axis(value: i32, size: i32) -> i32 {
    if value < 0 {
        size - 1
    } else if value >= size {
        0
    } else {
        value
    }
}
