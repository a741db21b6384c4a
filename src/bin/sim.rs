use broadside::{run_session, AutoPlayer, Game, GameConfig, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    broadside::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <game_seed> <player_seed>", args[0]);
        std::process::exit(1);
    }
    let game_seed: u64 = args[1].parse()?;
    let player_seed: u64 = args[2].parse()?;

    let config = GameConfig::default();
    let mut player = AutoPlayer::naive(&config, SmallRng::seed_from_u64(player_seed));
    let mut game = Game::new(config, SmallRng::seed_from_u64(game_seed))?;
    let report = run_session(&mut game, &mut player)?;

    let winner = match report.winner {
        Some(Side::Player) => Some("player"),
        Some(Side::Cpu) => Some("cpu"),
        None => None,
    };
    let stats = report.stats;
    let result = json!({
        "player": {"hits": stats.player_hits, "misses": stats.player_misses, "ships": stats.player_ships},
        "cpu": {"hits": stats.cpu_hits, "misses": stats.cpu_misses, "ships": stats.cpu_ships},
        "turns": stats.turns,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
