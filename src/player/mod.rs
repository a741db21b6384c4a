//! Player trait and implementations
//!
//! The human side of a game is driven through the [`Player`] trait. The
//! coordinator never reads input itself; a session asks the player for raw
//! coordinate text and reports back what happened.
//! - CliPlayer: interactive terminal player
//! - ScriptedPlayer: replays a fixed list of inputs
//! - AutoPlayer: fires whatever its own targeting engine picks

use crate::core::{Board, BitGrid, GameConfig, Side, TurnOutcome};

/// What the human side is allowed to see when choosing a shot.
#[derive(Clone, Copy)]
pub struct PlayerView<'a> {
    pub config: &'a GameConfig,
    /// The player's own board, ships visible.
    pub own_board: &'a Board,
    /// The CPU board. Render it with [`Viewer::Opponent`](crate::ui::Viewer::Opponent).
    pub opponent_board: &'a Board,
    /// Cells the player has already fired at.
    pub guesses: &'a BitGrid,
}

/// Interface implemented by different player types.
pub trait Player {
    /// Raw coordinate text for the next shot, or `None` when the player
    /// has quit or run out of input.
    fn next_guess(&mut self, view: &PlayerView<'_>) -> anyhow::Result<Option<String>>;

    /// The last input was rejected; `message` says why.
    fn handle_rejection(&mut self, _message: &str) {}

    /// A shot by either side was resolved.
    fn handle_turn(&mut self, _outcome: &TurnOutcome, _message: &str) {}

    /// The game ended.
    fn handle_game_over(&mut self, _winner: Side, _message: &str) {}
}

pub mod auto;
pub use auto::AutoPlayer;

pub mod cli;
pub use cli::CliPlayer;

pub mod scripted;
pub use scripted::ScriptedPlayer;
