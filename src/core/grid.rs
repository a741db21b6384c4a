//! A square bit grid sized at runtime.
//!
//! Cells are packed row-major into `u64` words. Used for guess sets and the
//! attacked set on a [`Board`](crate::core::board::Board), where membership
//! tests and counts happen on every move.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::coord::Coordinate;

const WORD_BITS: usize = u64::BITS as usize;

/// Errors returned by bit grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Row or column index is out of bounds `[0..size)`.
    #[error("coordinate {coord} is outside a {size}x{size} grid")]
    IndexOutOfBounds { coord: Coordinate, size: usize },
    /// Decoded words do not describe a `size`×`size` grid.
    #[error("{words} words with padding {padding:#x} cannot hold a {size}x{size} grid")]
    Malformed {
        size: usize,
        words: usize,
        padding: u64,
    },
}

/// A fixed-size `size`×`size` set of coordinates.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBitGrid")]
pub struct BitGrid {
    size: usize,
    words: Vec<u64>,
}

/// Unchecked wire form of a [`BitGrid`].
#[derive(Deserialize)]
struct RawBitGrid {
    size: usize,
    words: Vec<u64>,
}

impl TryFrom<RawBitGrid> for BitGrid {
    type Error = GridError;

    fn try_from(raw: RawBitGrid) -> Result<Self, GridError> {
        let malformed = |padding| GridError::Malformed {
            size: raw.size,
            words: raw.words.len(),
            padding,
        };
        let cells = raw.size.checked_mul(raw.size).ok_or_else(|| malformed(0))?;
        if raw.words.len() != cells.div_ceil(WORD_BITS) {
            return Err(malformed(0));
        }
        // bits past the last cell must stay clear or counts go wrong
        let used = cells % WORD_BITS;
        if used != 0 {
            let padding = raw.words.last().map_or(0, |w| w >> used);
            if padding != 0 {
                return Err(malformed(padding));
            }
        }
        Ok(BitGrid {
            size: raw.size,
            words: raw.words,
        })
    }
}

impl BitGrid {
    /// Create an empty grid.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        BitGrid {
            size,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Creates a grid from an iterator over coordinates.
    pub fn from_iter<I>(size: usize, iter: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut grid = Self::new(size);
        for coord in iter {
            grid.set(coord)?;
        }
        Ok(grid)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on the grid (`size * size`).
    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// True when every cell is set.
    pub fn is_full(&self) -> bool {
        self.count_ones() == self.capacity()
    }

    /// Gets the bit at `coord`.
    pub fn get(&self, coord: Coordinate) -> Result<bool, GridError> {
        let idx = self.index(coord)?;
        Ok((self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1)
    }

    /// Membership test; out-of-bounds coordinates are never members.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.get(coord).unwrap_or(false)
    }

    /// Sets the bit at `coord`. Returns `true` if it was previously clear.
    pub fn set(&mut self, coord: Coordinate) -> Result<bool, GridError> {
        let idx = self.index(coord)?;
        let word = &mut self.words[idx / WORD_BITS];
        let bit = 1u64 << (idx % WORD_BITS);
        let fresh = *word & bit == 0;
        *word |= bit;
        Ok(fresh)
    }

    /// Iterator over the set cells in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all(self.size).filter(|c| self.contains(*c))
    }

    /// Iterator over the clear cells in row-major order.
    pub fn iter_unset(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all(self.size).filter(|c| !self.contains(*c))
    }

    #[inline]
    fn index(&self, coord: Coordinate) -> Result<usize, GridError> {
        if coord.in_bounds(self.size) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(GridError::IndexOutOfBounds {
                coord,
                size: self.size,
            })
        }
    }
}

impl fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid<{}>:", self.size)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.contains(Coordinate::new(r, c)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
