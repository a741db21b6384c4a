use anyhow::Context;
use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::core::{Game, GameError, GameStats, Phase, Side};
use crate::player::{Player, PlayerView};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// `None` when the player stopped before the game was decided.
    pub winner: Option<Side>,
    pub stats: GameStats,
}

/// Drive `game` to completion, asking `player` for every human shot.
///
/// Rejected input is reported to the player and asked for again without
/// advancing the game. Any other coordinator error ends the session.
pub fn run_session<R: Rng, P: Player + ?Sized>(
    game: &mut Game<R>,
    player: &mut P,
) -> anyhow::Result<SessionReport> {
    loop {
        match game.phase() {
            Phase::Setup => game.setup().context("fleet placement failed")?,
            Phase::PlayerTurn => {
                let view = PlayerView {
                    config: game.config(),
                    own_board: game.player_board(),
                    opponent_board: game.cpu_board(),
                    guesses: game.player_guesses(),
                };
                let Some(input) = player.next_guess(&view)? else {
                    debug!("player left before the game was decided");
                    return Ok(SessionReport {
                        winner: None,
                        stats: game.stats(),
                    });
                };
                match game.player_turn(input.trim()) {
                    Ok(outcome) => {
                        let message = outcome.message(&game.config().messages);
                        player.handle_turn(&outcome, &message);
                    }
                    Err(GameError::Validation(e)) => {
                        debug!("rejected input {:?}: {}", input, e);
                        player.handle_rejection(&e.message(&game.config().messages));
                    }
                    Err(e) => return Err(e).context("player turn failed"),
                }
            }
            Phase::CpuTurn => {
                let outcome = game.cpu_turn().context("CPU turn failed")?;
                let message = outcome.message(&game.config().messages);
                player.handle_turn(&outcome, &message);
            }
            Phase::GameOver(winner) => {
                let messages = &game.config().messages;
                let headline = match winner {
                    Side::Player => &messages.player_wins,
                    Side::Cpu => &messages.cpu_wins,
                };
                let message = format!("{}\n{}", headline, game.summary());
                player.handle_game_over(winner, &message);
                return Ok(SessionReport {
                    winner: Some(winner),
                    stats: game.final_stats().unwrap_or_else(|| game.stats()),
                });
            }
        }
    }
}
