//! Target-mode candidate queue.

use std::cmp::Reverse;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::coord::{Coordinate, Direction};
use crate::core::grid::BitGrid;
use crate::core::ship::Orientation;

/// Priority of an ordinary candidate.
pub const BASE_PRIORITY: u8 = 0;
/// Priority of a candidate lying along the inferred ship orientation.
pub const ALIGNED_PRIORITY: u8 = 1;

/// A candidate coordinate waiting to be fired at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub coord: Coordinate,
    /// Direction from the hit that produced this candidate.
    pub direction: Direction,
    pub priority: u8,
}

/// Candidates ordered by priority, FIFO within equal priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetQueue {
    entries: VecDeque<TargetEntry>,
}

impl TargetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetEntry> {
        self.entries.iter()
    }

    /// Queued coordinates front to back.
    pub fn coords(&self) -> Vec<Coordinate> {
        self.entries.iter().map(|e| e.coord).collect()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.entries.iter().any(|e| e.coord == coord)
    }

    /// Insert behind every entry of equal or higher priority.
    pub fn push(&mut self, entry: TargetEntry) {
        let at = self
            .entries
            .iter()
            .position(|e| e.priority < entry.priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
    }

    /// Enqueue the in-bounds, unguessed, not-yet-queued neighbours of `hit`
    /// in north, south, west, east order. When `bias` is set, neighbours
    /// along that axis are queued at [`ALIGNED_PRIORITY`]. Returns how many
    /// entries were added.
    pub fn add_targets(
        &mut self,
        hit: Coordinate,
        guesses: &BitGrid,
        bias: Option<Orientation>,
    ) -> usize {
        let size = guesses.size();
        let mut added = 0;
        for direction in Direction::ALL {
            let Some(coord) = hit.step(direction, size) else {
                continue;
            };
            if guesses.contains(coord) || self.contains(coord) {
                continue;
            }
            let aligned = match (bias, direction) {
                (Some(Orientation::Horizontal), Direction::West | Direction::East) => true,
                (Some(Orientation::Vertical), Direction::North | Direction::South) => true,
                _ => false,
            };
            self.push(TargetEntry {
                coord,
                direction,
                priority: if aligned { ALIGNED_PRIORITY } else { BASE_PRIORITY },
            });
            added += 1;
        }
        added
    }

    /// Raise every entry on row `line` (horizontal) or column `line`
    /// (vertical) to [`ALIGNED_PRIORITY`], drop the rest to base, and move
    /// the raised ones to the front keeping their relative order.
    pub fn elevate(&mut self, orientation: Orientation, line: usize) {
        for entry in self.entries.iter_mut() {
            let on_line = match orientation {
                Orientation::Horizontal => entry.coord.row == line,
                Orientation::Vertical => entry.coord.col == line,
            };
            entry.priority = if on_line { ALIGNED_PRIORITY } else { BASE_PRIORITY };
        }
        self.entries
            .make_contiguous()
            .sort_by_key(|e| Reverse(e.priority));
    }

    /// Pop from the front, discarding entries already in `guesses`.
    pub fn next_target(&mut self, guesses: &BitGrid) -> Option<TargetEntry> {
        while let Some(entry) = self.entries.pop_front() {
            if !guesses.contains(entry.coord) {
                return Some(entry);
            }
        }
        None
    }
}
