//! Common types for Broadside: attack results, cell states and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::{fill_template, Messages};
use crate::core::coord::Coordinate;
use crate::core::grid::GridError;

/// Display state of a single board cell. Game logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Water,
    ShipVisible,
    Hit,
    Miss,
}

/// Outcome of resolving one attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    /// The attack landed on a ship segment.
    pub hit: bool,
    /// The attack sank the ship it hit.
    pub sunk: bool,
    /// Index of the ship hit, in placement order.
    pub ship: Option<usize>,
}

impl AttackResult {
    pub const MISS: AttackResult = AttackResult {
        hit: false,
        sunk: false,
        ship: None,
    };
}

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Cpu,
}

/// Rejected coordinate input. Recoverable: the turn does not advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Not exactly two ASCII digits.
    #[error("coordinates must be exactly two digits")]
    InvalidFormat,
    /// Row or column is past the edge of the board.
    #[error("coordinates must be between 0 and {max}")]
    OutOfBounds { max: usize },
    /// The side has already fired at this coordinate.
    #[error("coordinate already guessed")]
    DuplicateGuess,
}

impl ValidationError {
    /// Render the user-facing message from the configured templates.
    pub fn message(&self, messages: &Messages) -> String {
        match self {
            ValidationError::InvalidFormat => messages.invalid_format.clone(),
            ValidationError::OutOfBounds { max } => {
                fill_template(&messages.out_of_bounds, &[("max", &max.to_string())])
            }
            ValidationError::DuplicateGuess => messages.duplicate_guess.clone(),
        }
    }
}

/// Errors returned by [`Board`](crate::core::board::Board) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Coordinate is off the board.
    #[error("coordinate {0} is out of bounds")]
    OutOfBounds(Coordinate),
    /// Ship placement overlaps another ship.
    #[error("ship placement overlaps another ship at {0}")]
    Overlap(Coordinate),
    /// Attack was already made at this position.
    #[error("coordinate {0} was already attacked")]
    AlreadyAttacked(Coordinate),
    /// Ship cells are empty, repeated, or not a straight contiguous line.
    #[error("ship cells do not form a straight contiguous line")]
    InvalidShip,
    /// Restored snapshot is internally inconsistent.
    #[error("corrupt board state: {0}")]
    CorruptState(&'static str),
}

impl From<GridError> for BoardError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::IndexOutOfBounds { coord, .. } => BoardError::OutOfBounds(coord),
            GridError::Malformed { .. } => BoardError::CorruptState("attacked grid malformed"),
        }
    }
}

/// Random fleet generation could not find a legal layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementFailure {
    /// A single ship could not be placed within the per-ship attempt cap.
    #[error("ship {ship} could not be placed after {attempts} attempts")]
    ShipAttemptsExhausted { ship: usize, attempts: u32 },
    /// Every whole-fleet regeneration failed; the fleet does not fit the board.
    #[error("no fleet layout found after {layouts} attempts; too many or too long ships for the board")]
    LayoutAttemptsExhausted { layouts: u32 },
}

/// The targeting engine was asked for a move with nothing left to shoot at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("targeting engine has no unguessed coordinate left ({guessed} of {cells} guessed)")]
pub struct TargetingExhausted {
    pub guessed: usize,
    pub cells: usize,
}
