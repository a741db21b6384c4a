//! Turn coordinator: sequences setup, player turns, CPU turns and game over.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ai::TargetingEngine;
use crate::core::board::Board;
use crate::core::common::{
    AttackResult, BoardError, PlacementFailure, Side, TargetingExhausted, ValidationError,
};
use crate::core::config::{fill_template, ConfigError, GameConfig, Messages};
use crate::core::coord::Coordinate;
use crate::core::grid::BitGrid;
use crate::core::placement::PlacementEngine;

/// Where the game is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    PlayerTurn,
    CpuTurn,
    GameOver(Side),
}

/// Running totals built from attack results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Completed player turns.
    pub turns: usize,
    pub player_hits: usize,
    pub player_misses: usize,
    pub cpu_hits: usize,
    pub cpu_misses: usize,
    /// Player ships still afloat.
    pub player_ships: usize,
    /// CPU ships still afloat.
    pub cpu_ships: usize,
}

impl GameStats {
    fn record(&mut self, side: Side, result: AttackResult) {
        let (hits, misses, target_ships) = match side {
            Side::Player => (&mut self.player_hits, &mut self.player_misses, &mut self.cpu_ships),
            Side::Cpu => (&mut self.cpu_hits, &mut self.cpu_misses, &mut self.player_ships),
        };
        if result.hit {
            *hits += 1;
        } else {
            *misses += 1;
        }
        if result.sunk {
            *target_ships = target_ships.saturating_sub(1);
        }
        if side == Side::Player {
            self.turns += 1;
        }
    }
}

/// Entry in the coordinator's append-only event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Shot {
        side: Side,
        coord: Coordinate,
        result: AttackResult,
    },
    Finished {
        winner: Side,
    },
}

/// Result of one resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub side: Side,
    pub coord: Coordinate,
    pub result: AttackResult,
    /// Phase after the turn.
    pub phase: Phase,
}

impl TurnOutcome {
    /// User-facing description of the shot.
    pub fn message(&self, messages: &Messages) -> String {
        let template = match (self.side, self.result.hit, self.result.sunk) {
            (Side::Player, _, true) => &messages.player_sunk,
            (Side::Player, true, false) => &messages.player_hit,
            (Side::Player, false, _) => &messages.player_miss,
            (Side::Cpu, _, true) => &messages.cpu_sunk,
            (Side::Cpu, true, false) => &messages.cpu_hit,
            (Side::Cpu, false, _) => &messages.cpu_miss,
        };
        fill_template(template, &[("coord", &self.coord.to_string())])
    }
}

/// Errors surfaced by the coordinator. Only [`GameError::Validation`] is
/// recoverable; everything else ends the game run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Placement(#[from] PlacementFailure),
    #[error(transparent)]
    Targeting(#[from] TargetingExhausted),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot {action} during {phase:?}")]
    WrongPhase { action: &'static str, phase: Phase },
}

impl GameError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::Validation(_))
    }
}

/// One human-vs-CPU game. Owns both boards, both guess sets, the CPU's
/// targeting engine and the random source.
pub struct Game<R: Rng = SmallRng> {
    config: GameConfig,
    phase: Phase,
    player_board: Board,
    cpu_board: Board,
    player_guesses: BitGrid,
    cpu_guesses: BitGrid,
    targeting: TargetingEngine,
    rng: R,
    stats: GameStats,
    final_stats: Option<GameStats>,
    events: Vec<GameEvent>,
}

impl<R: Rng> Game<R> {
    /// New game in [`Phase::Setup`] with empty boards.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let size = config.board_size;
        Ok(Game {
            phase: Phase::Setup,
            player_board: Board::new(size),
            cpu_board: Board::new(size),
            player_guesses: BitGrid::new(size),
            cpu_guesses: BitGrid::new(size),
            targeting: TargetingEngine::new(&config),
            rng,
            stats: GameStats::default(),
            final_stats: None,
            events: Vec::new(),
            config,
        })
    }

    /// Game starting at the player's first turn with fleets already laid
    /// out, for scripted scenarios.
    pub fn with_boards(
        config: GameConfig,
        player_board: Board,
        cpu_board: Board,
        rng: R,
    ) -> Result<Self, GameError> {
        let mut game = Game::new(config, rng)?;
        for board in [&player_board, &cpu_board] {
            game.check_prepared(board)?;
        }
        game.player_board = player_board;
        game.cpu_board = cpu_board;
        game.start();
        Ok(game)
    }

    fn check_prepared(&self, board: &Board) -> Result<(), BoardError> {
        if board.size() != self.config.board_size || !board.attacked().is_empty() {
            return Err(BoardError::CorruptState("prepared board does not match a fresh game"));
        }
        let fleet_matches = board.ships().len() == self.config.num_ships
            && board.ships().iter().all(|s| s.len() == self.config.ship_length);
        if !fleet_matches {
            return Err(BoardError::CorruptState("prepared fleet does not match the configuration"));
        }
        Ok(())
    }

    /// Lay out both fleets and hand the first turn to the player.
    pub fn setup(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::Setup, "set up")?;
        let placement = PlacementEngine::new(&self.config);
        placement.place_fleet(&mut self.player_board, &mut self.rng)?;
        placement.place_fleet(&mut self.cpu_board, &mut self.rng)?;
        info!(
            "fleets placed: {} ships of length {} on {}x{}",
            self.config.num_ships, self.config.ship_length, self.config.board_size, self.config.board_size
        );
        self.start();
        Ok(())
    }

    fn start(&mut self) {
        self.stats.player_ships = self.player_board.ships_remaining();
        self.stats.cpu_ships = self.cpu_board.ships_remaining();
        self.events.push(GameEvent::Started);
        self.phase = Phase::PlayerTurn;
    }

    /// Parse and check raw player input against the board and the player's
    /// guess set, in that order.
    pub fn validate_guess(&self, input: &str) -> Result<Coordinate, ValidationError> {
        let coord = Coordinate::parse(input, self.config.board_size)?;
        if self.player_guesses.contains(coord) {
            return Err(ValidationError::DuplicateGuess);
        }
        Ok(coord)
    }

    /// Take the player's turn from raw input. A validation error leaves the
    /// phase untouched so the caller can ask again.
    pub fn player_turn(&mut self, input: &str) -> Result<TurnOutcome, GameError> {
        self.expect_phase(Phase::PlayerTurn, "take a player turn")?;
        let coord = self.validate_guess(input)?;
        self.player_attack(coord)
    }

    /// Fire the player's shot at `coord` on the CPU board.
    pub fn player_attack(&mut self, coord: Coordinate) -> Result<TurnOutcome, GameError> {
        self.expect_phase(Phase::PlayerTurn, "take a player turn")?;
        if !coord.in_bounds(self.config.board_size) {
            return Err(ValidationError::OutOfBounds {
                max: self.config.max_index(),
            }
            .into());
        }
        if self.player_guesses.contains(coord) {
            return Err(ValidationError::DuplicateGuess.into());
        }
        let result = self.cpu_board.attack(coord)?;
        self.player_guesses.set(coord).map_err(BoardError::from)?;
        let next = if self.cpu_board.all_ships_sunk() {
            Phase::GameOver(Side::Player)
        } else {
            Phase::CpuTurn
        };
        Ok(self.resolve(Side::Player, coord, result, next))
    }

    /// Let the targeting engine choose a shot and fire it.
    pub fn cpu_turn(&mut self) -> Result<TurnOutcome, GameError> {
        self.expect_phase(Phase::CpuTurn, "take a CPU turn")?;
        let coord = self.targeting.select_move(&self.cpu_guesses, &mut self.rng)?;
        self.cpu_attack(coord)
    }

    /// Fire a CPU shot at `coord` on the player board and feed the result
    /// back to the targeting engine.
    pub fn cpu_attack(&mut self, coord: Coordinate) -> Result<TurnOutcome, GameError> {
        self.expect_phase(Phase::CpuTurn, "take a CPU turn")?;
        if self.cpu_guesses.contains(coord) {
            return Err(BoardError::AlreadyAttacked(coord).into());
        }
        let result = self.player_board.attack(coord)?;
        self.cpu_guesses.set(coord).map_err(BoardError::from)?;
        self.targeting.record_result(coord, result, &self.cpu_guesses);
        let next = if self.player_board.all_ships_sunk() {
            Phase::GameOver(Side::Cpu)
        } else {
            Phase::PlayerTurn
        };
        Ok(self.resolve(Side::Cpu, coord, result, next))
    }

    fn resolve(&mut self, side: Side, coord: Coordinate, result: AttackResult, next: Phase) -> TurnOutcome {
        debug!("{:?} fired at {}: {:?}", side, coord, result);
        self.stats.record(side, result);
        self.events.push(GameEvent::Shot { side, coord, result });
        if let Phase::GameOver(winner) = next {
            info!("game over, {:?} wins after {} turns", winner, self.stats.turns);
            self.events.push(GameEvent::Finished { winner });
            self.final_stats = Some(self.stats);
        }
        self.phase = next;
        TurnOutcome {
            side,
            coord,
            result,
            phase: next,
        }
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn cpu_board(&self) -> &Board {
        &self.cpu_board
    }

    /// Cells the player has fired at.
    pub fn player_guesses(&self) -> &BitGrid {
        &self.player_guesses
    }

    /// Cells the CPU has fired at.
    pub fn cpu_guesses(&self) -> &BitGrid {
        &self.cpu_guesses
    }

    pub fn targeting(&self) -> &TargetingEngine {
        &self.targeting
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Stats frozen at the moment the game ended.
    pub fn final_stats(&self) -> Option<GameStats> {
        self.final_stats
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Summary line rendered from the configured template.
    pub fn summary(&self) -> String {
        let s = self.final_stats.unwrap_or(self.stats);
        fill_template(
            &self.config.messages.summary,
            &[
                ("turns", &s.turns.to_string()),
                ("player_hits", &s.player_hits.to_string()),
                ("player_misses", &s.player_misses.to_string()),
                ("cpu_hits", &s.cpu_hits.to_string()),
                ("cpu_misses", &s.cpu_misses.to_string()),
            ],
        )
    }
}
