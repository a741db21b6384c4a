//! Random, non-overlapping fleet layout.

use log::{debug, warn};
use rand::Rng;

use crate::core::board::Board;
use crate::core::common::PlacementFailure;
use crate::core::config::GameConfig;
use crate::core::coord::Coordinate;
use crate::core::ship::{Orientation, Ship};

/// Places a configured fleet of equal-length ships at random.
pub struct PlacementEngine<'a> {
    config: &'a GameConfig,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Populate `board` with the full fleet, regenerating the whole layout
    /// from an empty board whenever a single ship runs out of attempts.
    ///
    /// Fails only when every layout attempt failed, which means the fleet
    /// does not fit the board.
    pub fn place_fleet<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<(), PlacementFailure> {
        let layouts = self.config.layout_attempts;
        for layout in 1..=layouts {
            let mut candidate = Board::new(self.config.board_size);
            match self.try_layout(&mut candidate, rng) {
                Ok(()) => {
                    debug!("fleet placed on layout attempt {}", layout);
                    *board = candidate;
                    return Ok(());
                }
                Err(e) => warn!("layout attempt {}/{} failed: {}", layout, layouts, e),
            }
        }
        Err(PlacementFailure::LayoutAttemptsExhausted { layouts })
    }

    /// One layout attempt: place every ship in turn onto `board`.
    pub fn try_layout<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<(), PlacementFailure> {
        for ship in 0..self.config.num_ships {
            self.place_one(board, ship, rng)?;
        }
        Ok(())
    }

    /// Place ship number `ship`, retrying fresh random positions up to the
    /// per-ship attempt cap.
    fn place_one<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        ship: usize,
        rng: &mut R,
    ) -> Result<usize, PlacementFailure> {
        let attempts = self.config.placement_attempts;
        for attempt in 1..=attempts {
            let (origin, orientation) = self.random_origin(rng);
            let Ok(candidate) = Ship::new(origin, orientation, self.config.ship_length) else {
                break;
            };
            match board.place_ship(candidate) {
                Ok(index) => return Ok(index),
                Err(e) => debug!("ship {} attempt {}: {}", ship, attempt, e),
            }
        }
        Err(PlacementFailure::ShipAttemptsExhausted { ship, attempts })
    }

    /// Random orientation plus a start cell from which the whole ship fits.
    pub fn random_origin<R: Rng + ?Sized>(&self, rng: &mut R) -> (Coordinate, Orientation) {
        let size = self.config.board_size;
        let len = self.config.ship_length;
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (size.saturating_sub(1), size.saturating_sub(len)),
            Orientation::Vertical => (size.saturating_sub(len), size.saturating_sub(1)),
        };
        let r = rng.random_range(0..=max_r);
        let c = rng.random_range(0..=max_c);
        (Coordinate::new(r, c), orientation)
    }
}
