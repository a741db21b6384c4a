//! Game board: ship placements, attacked cells and hit/miss counters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::common::{AttackResult, BoardError, CellState};
use crate::core::coord::Coordinate;
use crate::core::grid::BitGrid;
use crate::core::ship::Ship;

/// Serializable board state for saving or comparing boards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub size: usize,
    pub cells: Vec<CellState>,
    pub ships: Vec<Ship>,
    pub attacked: BitGrid,
    pub hits: usize,
    pub misses: usize,
}

/// One side's board.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
    ships: Vec<Ship>,
    attacked: BitGrid,
    hits: usize,
    misses: usize,
}

impl Board {
    /// Create an empty `size`×`size` board (no ships placed).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![CellState::Water; size * size],
            ships: Vec::new(),
            attacked: BitGrid::new(size),
            hits: 0,
            misses: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Cells that have been attacked so far.
    pub fn attacked(&self) -> &BitGrid {
        &self.attacked
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Display state of `coord`, `None` if off the board.
    pub fn cell(&self, coord: Coordinate) -> Option<CellState> {
        coord
            .in_bounds(self.size)
            .then(|| self.cells[self.index(coord)])
    }

    /// The ship occupying `coord`, with its index.
    pub fn ship_at(&self, coord: Coordinate) -> Option<(usize, &Ship)> {
        self.ships.iter().enumerate().find(|(_, s)| s.contains(coord))
    }

    /// Add `ship` to the board. Returns its index.
    pub fn place_ship(&mut self, ship: Ship) -> Result<usize, BoardError> {
        for &coord in ship.cells() {
            if !coord.in_bounds(self.size) {
                return Err(BoardError::OutOfBounds(coord));
            }
            if self.ship_at(coord).is_some() {
                return Err(BoardError::Overlap(coord));
            }
        }
        for &coord in ship.cells() {
            let idx = self.index(coord);
            self.cells[idx] = CellState::ShipVisible;
        }
        self.ships.push(ship);
        Ok(self.ships.len() - 1)
    }

    /// Resolve an attack at `coord`, marking the cell and updating counters.
    pub fn attack(&mut self, coord: Coordinate) -> Result<AttackResult, BoardError> {
        // prevent duplicates
        if !self.attacked.set(coord)? {
            return Err(BoardError::AlreadyAttacked(coord));
        }
        let idx = self.index(coord);
        let hit_ship = self
            .ships
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.contains(coord));
        match hit_ship {
            Some((i, ship)) => {
                ship.hit(coord);
                self.cells[idx] = CellState::Hit;
                self.hits += 1;
                Ok(AttackResult {
                    hit: true,
                    sunk: ship.is_sunk(),
                    ship: Some(i),
                })
            }
            None => {
                self.cells[idx] = CellState::Miss;
                self.misses += 1;
                Ok(AttackResult::MISS)
            }
        }
    }

    /// Returns `true` when every placed ship is sunk.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Capture the full board state.
    pub fn state(&self) -> BoardState {
        BoardState::from(self)
    }

    /// Restore a board from a snapshot, rejecting inconsistent ones.
    pub fn from_state(state: BoardState) -> Result<Self, BoardError> {
        Board::try_from(state)
    }

    fn index(&self, coord: Coordinate) -> usize {
        coord.row * self.size + coord.col
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  hits: {},\n  misses: {},\n  attacked: {:?},\n  ships: {:?}\n}}",
            self.size, self.hits, self.misses, self.attacked, self.ships
        )
    }
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            size: b.size,
            cells: b.cells.clone(),
            ships: b.ships.clone(),
            attacked: b.attacked.clone(),
            hits: b.hits,
            misses: b.misses,
        }
    }
}

impl TryFrom<BoardState> for Board {
    type Error = BoardError;

    fn try_from(state: BoardState) -> Result<Self, BoardError> {
        let cells = state.size.checked_mul(state.size);
        if cells != Some(state.cells.len()) || state.attacked.size() != state.size {
            return Err(BoardError::CorruptState("grid dimensions disagree"));
        }
        let mut board = Board::new(state.size);
        for ship in state.ships {
            let hits = ship.hits().clone();
            if hits.iter().any(|c| !state.attacked.contains(*c)) {
                return Err(BoardError::CorruptState("ship hit on an unattacked cell"));
            }
            board.place_ship(Ship::with_hits(ship.cells().to_vec(), hits)?)?;
        }
        let ship_hits = state
            .attacked
            .iter_set()
            .filter(|c| board.ship_at(*c).is_some())
            .count();
        let recorded_hits: usize = board.ships.iter().map(|s| s.hits().len()).sum();
        if ship_hits != recorded_hits
            || state.hits != ship_hits
            || state.misses != state.attacked.count_ones() - ship_hits
        {
            return Err(BoardError::CorruptState("hit/miss counters disagree with attacks"));
        }
        board.cells = state.cells;
        board.attacked = state.attacked;
        board.hits = state.hits;
        board.misses = state.misses;
        Ok(board)
    }
}
