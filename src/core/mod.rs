//! Core Broadside engine.
//!
//! Pure game model and algorithms with no I/O: coordinates, boards and
//! ships, random fleet placement, the CPU targeting engine and the turn
//! coordinator. Everything random takes an injected [`rand::Rng`].

pub mod ai;
pub mod board;
pub mod common;
pub mod config;
pub mod coord;
pub mod game;
pub mod grid;
pub mod placement;
pub mod ship;

// Re-export commonly used types
pub use ai::{
    Heatmap, Mode, TargetEntry, TargetQueue, TargetingEngine, ALIGNED_PRIORITY, BASE_PRIORITY,
};
pub use board::{Board, BoardState};
pub use common::{
    AttackResult, BoardError, CellState, PlacementFailure, Side, TargetingExhausted,
    ValidationError,
};
pub use config::{fill_template, ConfigError, GameConfig, Messages, Symbols};
pub use coord::{Coordinate, Direction, MAX_BOARD_SIZE};
pub use game::{Game, GameError, GameEvent, GameStats, Phase, TurnOutcome};
pub use grid::{BitGrid, GridError};
pub use placement::PlacementEngine;
pub use ship::{Orientation, Ship};
