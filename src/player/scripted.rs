use std::collections::VecDeque;

use crate::core::{Side, TurnOutcome};

use super::{Player, PlayerView};

/// Replays queued inputs in order and keeps every message it was sent.
#[derive(Debug, Default)]
pub struct ScriptedPlayer {
    inputs: VecDeque<String>,
    rejections: Vec<String>,
    outcomes: Vec<TurnOutcome>,
    messages: Vec<String>,
    winner: Option<Side>,
}

impl ScriptedPlayer {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Inputs not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    pub fn outcomes(&self) -> &[TurnOutcome] {
        &self.outcomes
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }
}

impl Player for ScriptedPlayer {
    fn next_guess(&mut self, _view: &PlayerView<'_>) -> anyhow::Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    fn handle_rejection(&mut self, message: &str) {
        self.rejections.push(message.to_string());
    }

    fn handle_turn(&mut self, outcome: &TurnOutcome, message: &str) {
        self.outcomes.push(*outcome);
        self.messages.push(message.to_string());
    }

    fn handle_game_over(&mut self, winner: Side, message: &str) {
        self.winner = Some(winner);
        self.messages.push(message.to_string());
    }
}
