pub mod core;
mod logging;
pub mod player;
mod session;
pub mod ui;

pub use crate::core::*;
pub use logging::init_logging;
pub use player::{AutoPlayer, CliPlayer, Player, PlayerView, ScriptedPlayer};
pub use session::{run_session, SessionReport};
