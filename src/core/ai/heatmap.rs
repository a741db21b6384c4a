// Placement-window density over the unguessed cells of the opponent board.

use crate::core::coord::Coordinate;
use crate::core::grid::BitGrid;
use crate::core::ship::Orientation;

/// Per-cell count of ship placements that could still cover the cell.
///
/// A placement window is `ship_length` consecutive cells in a row or column.
/// It is valid only if none of its cells has been guessed, hit or miss:
/// guessed cells are either proven empty or already accounted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    size: usize,
    counts: Vec<u32>,
    max: u32,
}

impl Heatmap {
    /// Compute the window counts for a `guesses.size()` board.
    pub fn compute(ship_length: usize, guesses: &BitGrid) -> Self {
        let size = guesses.size();
        let mut counts = vec![0u32; size * size];

        if ship_length > 0 && ship_length <= size {
            for orient in [Orientation::Horizontal, Orientation::Vertical] {
                let (max_row, max_col) = match orient {
                    Orientation::Horizontal => (size, size - ship_length + 1),
                    Orientation::Vertical => (size - ship_length + 1, size),
                };
                for r in 0..max_row {
                    for c in 0..max_col {
                        let window = (0..ship_length).map(|k| match orient {
                            Orientation::Horizontal => Coordinate::new(r, c + k),
                            Orientation::Vertical => Coordinate::new(r + k, c),
                        });
                        if window.clone().any(|cell| guesses.contains(cell)) {
                            continue;
                        }
                        for cell in window {
                            counts[cell.row * size + cell.col] += 1;
                        }
                    }
                }
            }
        }

        let max = counts.iter().copied().max().unwrap_or(0);
        Heatmap { size, counts, max }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw number of valid windows covering `coord`.
    pub fn count(&self, coord: Coordinate) -> u32 {
        if coord.in_bounds(self.size) {
            self.counts[coord.row * self.size + coord.col]
        } else {
            0
        }
    }

    /// Count normalized by the board maximum, in `[0, 1]`. All zero when no
    /// window is valid.
    pub fn score(&self, coord: Coordinate) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.count(coord) as f64 / self.max as f64
        }
    }

    pub fn max_count(&self) -> u32 {
        self.max
    }

    /// Every coordinate tied at the maximum, row-major. Empty when nothing
    /// scores above zero.
    pub fn best(&self) -> Vec<Coordinate> {
        if self.max == 0 {
            return Vec::new();
        }
        Coordinate::all(self.size)
            .filter(|c| self.count(*c) == self.max)
            .collect()
    }
}
