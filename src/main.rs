use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use broadside::{
    init_logging, run_session, ui, AutoPlayer, CliPlayer, Game, GameConfig, Player, PlayerView,
    SessionReport, Side, TurnOutcome,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "JSON file overriding board size, fleet and messages")]
        config: Option<PathBuf>,
        #[arg(long, help = "Show a placement heatmap of the opponent board before each shot")]
        hints: bool,
    },
    /// Watch the computer play against an automatic opponent.
    Watch {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "JSON file overriding board size, fleet and messages")]
        config: Option<PathBuf>,
        #[arg(long, help = "Use an adaptive opponent instead of a random one")]
        adaptive: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Play {
        seed: None,
        config: None,
        hints: false,
    });

    match command {
        Commands::Play {
            seed,
            config,
            hints,
        } => {
            let config = load_config(config.as_deref())?;
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            println!(
                "Sink the {} enemy ships of length {} on a {}x{} board. Type 'quit' to leave.",
                config.num_ships, config.ship_length, config.board_size, config.board_size
            );
            let mut game = Game::new(config, make_rng(seed))?;
            let mut player = CliPlayer::stdio(hints);
            let report = run_session(&mut game, &mut player)?;
            if report.winner.is_none() {
                println!("Game abandoned.");
            }
        }
        Commands::Watch {
            seed,
            config,
            adaptive,
        } => {
            let config = load_config(config.as_deref())?;
            let opponent_rng = make_rng(seed.map(|s| s.wrapping_add(1)));
            let inner = if adaptive {
                AutoPlayer::adaptive(&config, opponent_rng)
            } else {
                AutoPlayer::naive(&config, opponent_rng)
            };
            let mut game = Game::new(config, make_rng(seed))?;
            let mut player = Narrator { inner };
            let report: SessionReport = run_session(&mut game, &mut player)?;
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Prints the boards and every message while an [`AutoPlayer`] plays.
struct Narrator {
    inner: AutoPlayer,
}

impl Player for Narrator {
    fn next_guess(&mut self, view: &PlayerView<'_>) -> anyhow::Result<Option<String>> {
        println!(
            "\n{}",
            ui::render_boards(view.opponent_board, view.own_board, &view.config.symbols)
        );
        self.inner.next_guess(view)
    }

    fn handle_turn(&mut self, outcome: &TurnOutcome, message: &str) {
        println!("{}", message);
        self.inner.handle_turn(outcome, message);
    }

    fn handle_game_over(&mut self, _winner: Side, message: &str) {
        println!("\n{}", message);
    }
}
