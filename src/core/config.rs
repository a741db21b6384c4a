//! Game configuration.
//!
//! A [`GameConfig`] is built once (usually from defaults or a JSON file) and
//! passed by reference to everything that needs board dimensions, fleet
//! shape, retry caps or message text. Nothing reads configuration globally.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::coord::MAX_BOARD_SIZE;

pub const DEFAULT_BOARD_SIZE: usize = 10;
pub const DEFAULT_NUM_SHIPS: usize = 3;
pub const DEFAULT_SHIP_LENGTH: usize = 3;
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 100;
pub const DEFAULT_LAYOUT_ATTEMPTS: u32 = 50;
pub const DEFAULT_PROBABILITY_AFTER_MISSES: u32 = 3;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be between 1 and 10, got {0}")]
    BoardSize(usize),
    #[error("ship length must be between 1 and the board size {board}, got {length}")]
    ShipLength { length: usize, board: usize },
    #[error("at least one ship is required")]
    NoShips,
    #[error("fleet of {cells} cells cannot fit on {board_cells} board cells")]
    FleetTooLarge { cells: usize, board_cells: usize },
    #[error("{0} must be at least 1")]
    ZeroAttempts(&'static str),
}

/// Immutable settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub num_ships: usize,
    pub ship_length: usize,
    /// Random start/orientation attempts per ship before the layout is abandoned.
    pub placement_attempts: u32,
    /// Whole-fleet regenerations before placement is declared impossible.
    pub layout_attempts: u32,
    /// Consecutive Hunt misses before the CPU escalates to Probability mode.
    pub probability_after_misses: u32,
    pub symbols: Symbols,
    pub messages: Messages,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            num_ships: DEFAULT_NUM_SHIPS,
            ship_length: DEFAULT_SHIP_LENGTH,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            layout_attempts: DEFAULT_LAYOUT_ATTEMPTS,
            probability_after_misses: DEFAULT_PROBABILITY_AFTER_MISSES,
            symbols: Symbols::default(),
            messages: Messages::default(),
        }
    }
}

impl GameConfig {
    /// Check value ranges. Fleets that fit by cell count but not by geometry
    /// are only caught at placement time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.ship_length == 0 || self.ship_length > self.board_size {
            return Err(ConfigError::ShipLength {
                length: self.ship_length,
                board: self.board_size,
            });
        }
        if self.num_ships == 0 {
            return Err(ConfigError::NoShips);
        }
        let board_cells = self.board_cells();
        match self.num_ships.checked_mul(self.ship_length) {
            Some(cells) if cells <= board_cells => {}
            cells => {
                return Err(ConfigError::FleetTooLarge {
                    cells: cells.unwrap_or(usize::MAX),
                    board_cells,
                })
            }
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("placement_attempts"));
        }
        if self.layout_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("layout_attempts"));
        }
        if self.probability_after_misses == 0 {
            return Err(ConfigError::ZeroAttempts("probability_after_misses"));
        }
        Ok(())
    }

    pub fn board_cells(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Largest valid row/column index.
    pub fn max_index(&self) -> usize {
        self.board_size.saturating_sub(1)
    }
}

/// The four characters a cell can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbols {
    pub water: char,
    pub ship: char,
    pub hit: char,
    pub miss: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Symbols {
            water: '~',
            ship: 'S',
            hit: 'X',
            miss: 'o',
        }
    }
}

/// User-facing message templates. `{name}` placeholders are filled by
/// [`fill_template`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub prompt: String,
    pub invalid_format: String,
    /// Placeholders: `{max}`.
    pub out_of_bounds: String,
    pub duplicate_guess: String,
    /// Placeholders: `{coord}`.
    pub player_hit: String,
    pub player_miss: String,
    pub player_sunk: String,
    pub cpu_hit: String,
    pub cpu_miss: String,
    pub cpu_sunk: String,
    pub player_wins: String,
    pub cpu_wins: String,
    /// Placeholders: `{turns}`, `{player_hits}`, `{player_misses}`, `{cpu_hits}`, `{cpu_misses}`.
    pub summary: String,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            prompt: "Enter your guess (e.g., 00): ".into(),
            invalid_format: "Oops, input must be exactly two digits.".into(),
            out_of_bounds: "Oops, please enter valid row and column numbers between 0 and {max}."
                .into(),
            duplicate_guess: "You already guessed that location!".into(),
            player_hit: "PLAYER HIT at {coord}!".into(),
            player_miss: "PLAYER MISS at {coord}.".into(),
            player_sunk: "You sunk an enemy battleship at {coord}!".into(),
            cpu_hit: "CPU HIT at {coord}!".into(),
            cpu_miss: "CPU MISS at {coord}.".into(),
            cpu_sunk: "CPU sunk your battleship at {coord}!".into(),
            player_wins: "*** CONGRATULATIONS! You sunk all enemy battleships! ***".into(),
            cpu_wins: "*** GAME OVER! The CPU sunk all your battleships! ***".into(),
            summary: "Turns: {turns} | You: {player_hits} hits, {player_misses} misses | CPU: {cpu_hits} hits, {cpu_misses} misses"
                .into(),
        }
    }
}

/// Replace every `{key}` in `template` with its value. Unknown placeholders
/// and unmatched braces are left as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
