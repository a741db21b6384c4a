//! Board coordinates and their two-digit text form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::common::ValidationError;

/// Largest board the two-digit "RC" text form can address.
pub const MAX_BOARD_SIZE: usize = 10;

/// A (row, col) position on a square board. Both components are zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

/// Compass direction from a hit toward one of its orthogonal neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Order used when seeding targets around a hit.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if both components lie in `[0, size)`.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Neighbour one step in `dir`, or `None` when it would leave a board of `size`.
    pub fn step(&self, dir: Direction, size: usize) -> Option<Coordinate> {
        let next = match dir {
            Direction::North => Coordinate::new(self.row.checked_sub(1)?, self.col),
            Direction::South => Coordinate::new(self.row + 1, self.col),
            Direction::West => Coordinate::new(self.row, self.col.checked_sub(1)?),
            Direction::East => Coordinate::new(self.row, self.col + 1),
        };
        next.in_bounds(size).then_some(next)
    }

    /// Parse the "RC" form (row digit then column digit) for a board of `size`.
    ///
    /// Format is checked before bounds: `"a1"` is [`ValidationError::InvalidFormat`]
    /// even on a small board, `"95"` on a 5×5 board is [`ValidationError::OutOfBounds`].
    pub fn parse(text: &str, size: usize) -> Result<Coordinate, ValidationError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ValidationError::InvalidFormat);
        }
        let coord = Coordinate::new((bytes[0] - b'0') as usize, (bytes[1] - b'0') as usize);
        if !coord.in_bounds(size) {
            return Err(ValidationError::OutOfBounds {
                max: size.saturating_sub(1),
            });
        }
        Ok(coord)
    }

    /// Every coordinate of a `size`×`size` board in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Coordinate> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Coordinate::new(row, col)))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}
