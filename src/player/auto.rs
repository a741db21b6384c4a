use rand::rngs::SmallRng;

use crate::core::{BitGrid, GameConfig, Side, TargetingEngine, TurnOutcome};

use super::{Player, PlayerView};

/// Player that fires wherever its own targeting engine says.
pub struct AutoPlayer {
    engine: TargetingEngine,
    rng: SmallRng,
    shots: BitGrid,
}

impl AutoPlayer {
    /// Adaptive hunt/target/probability player.
    pub fn adaptive(config: &GameConfig, rng: SmallRng) -> Self {
        Self::with_engine(TargetingEngine::new(config), config, rng)
    }

    /// Player that fires at random unguessed cells.
    pub fn naive(config: &GameConfig, rng: SmallRng) -> Self {
        Self::with_engine(TargetingEngine::naive(config), config, rng)
    }

    fn with_engine(engine: TargetingEngine, config: &GameConfig, rng: SmallRng) -> Self {
        Self {
            engine,
            rng,
            shots: BitGrid::new(config.board_size),
        }
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }
}

impl Player for AutoPlayer {
    fn next_guess(&mut self, view: &PlayerView<'_>) -> anyhow::Result<Option<String>> {
        let coord = self.engine.select_move(view.guesses, &mut self.rng)?;
        Ok(Some(coord.to_string()))
    }

    fn handle_turn(&mut self, outcome: &TurnOutcome, _message: &str) {
        if outcome.side == Side::Player {
            let _ = self.shots.set(outcome.coord);
            self.engine
                .record_result(outcome.coord, outcome.result, &self.shots);
        }
    }
}
