use std::io::{self, BufRead, Write};

use crate::core::{Heatmap, Side, TurnOutcome};
use crate::ui;

use super::{Player, PlayerView};

/// Interactive player reading coordinates line by line.
pub struct CliPlayer<R, W> {
    input: R,
    output: W,
    hints: bool,
}

impl CliPlayer<io::StdinLock<'static>, io::Stdout> {
    /// Player on the process's stdin/stdout.
    pub fn stdio(hints: bool) -> Self {
        CliPlayer::new(io::stdin().lock(), io::stdout(), hints)
    }
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    /// With `hints`, a heatmap of the opponent board is shown before each prompt.
    pub fn new(input: R, output: W, hints: bool) -> Self {
        Self {
            input,
            output,
            hints,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }
}

impl<R: BufRead, W: Write> Player for CliPlayer<R, W> {
    fn next_guess(&mut self, view: &PlayerView<'_>) -> anyhow::Result<Option<String>> {
        let boards = ui::render_boards(view.opponent_board, view.own_board, &view.config.symbols);
        writeln!(self.output, "\n{}", boards)?;
        if self.hints {
            let heatmap = Heatmap::compute(view.config.ship_length, view.guesses);
            writeln!(self.output, "{}", ui::render_heatmap(&heatmap))?;
        }
        write!(self.output, "{}", view.config.messages.prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }

    fn handle_rejection(&mut self, message: &str) {
        self.say(message);
    }

    fn handle_turn(&mut self, outcome: &TurnOutcome, message: &str) {
        if outcome.side == Side::Cpu {
            let _ = writeln!(self.output, "\n--- CPU's Turn ---");
        }
        self.say(message);
    }

    fn handle_game_over(&mut self, _winner: Side, message: &str) {
        self.say(&format!("\n{}", message));
    }
}
