//! Ship definitions and hit tracking.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::common::BoardError;
use crate::core::coord::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A placed vessel: the straight run of cells it occupies and which of them
/// have been hit. Knows nothing about the board it sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    cells: Vec<Coordinate>,
    hits: BTreeSet<Coordinate>,
}

impl Ship {
    /// Ship of `length` cells starting at `origin` and extending right
    /// (horizontal) or down (vertical). Bounds are the board's concern.
    pub fn new(origin: Coordinate, orientation: Orientation, length: usize) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidShip);
        }
        let cells = (0..length)
            .map(|i| match orientation {
                Orientation::Horizontal => Coordinate::new(origin.row, origin.col + i),
                Orientation::Vertical => Coordinate::new(origin.row + i, origin.col),
            })
            .collect();
        Ok(Ship {
            cells,
            hits: BTreeSet::new(),
        })
    }

    /// Build a ship from an explicit cell list, which must be a contiguous
    /// run in a single row or column, in order.
    pub fn from_cells(cells: Vec<Coordinate>) -> Result<Self, BoardError> {
        if !is_straight_run(&cells) {
            return Err(BoardError::InvalidShip);
        }
        Ok(Ship {
            cells,
            hits: BTreeSet::new(),
        })
    }

    /// Register a hit at `coord`. Returns `true` if `coord` belongs to this
    /// ship; hitting the same cell twice changes nothing.
    pub fn hit(&mut self, coord: Coordinate) -> bool {
        if self.contains(coord) {
            self.hits.insert(coord);
            true
        } else {
            false
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.cells.len()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Occupied cells in order from the origin.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn hits(&self) -> &BTreeSet<Coordinate> {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Orientation, or `None` for a single-cell ship.
    pub fn orientation(&self) -> Option<Orientation> {
        match self.cells.as_slice() {
            [a, b, ..] if a.row == b.row => Some(Orientation::Horizontal),
            [_, _, ..] => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// Rebuild a ship with a prior hit set, as captured in a board snapshot.
    pub(crate) fn with_hits(cells: Vec<Coordinate>, hits: BTreeSet<Coordinate>) -> Result<Self, BoardError> {
        let mut ship = Ship::from_cells(cells)?;
        for coord in hits {
            if !ship.hit(coord) {
                return Err(BoardError::CorruptState("ship hit outside its cells"));
            }
        }
        Ok(ship)
    }
}

fn is_straight_run(cells: &[Coordinate]) -> bool {
    let Some(first) = cells.first() else {
        return false;
    };
    let horizontal = cells.iter().all(|c| c.row == first.row);
    let vertical = cells.iter().all(|c| c.col == first.col);
    cells.iter().enumerate().all(|(i, c)| {
        (horizontal && first.col.checked_add(i) == Some(c.col))
            || (vertical && first.row.checked_add(i) == Some(c.row))
    })
}
