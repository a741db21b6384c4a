//! The computer opponent's targeting engine.
//!
//! One engine attacks one board for one game. It runs in a single [`Mode`]
//! at a time:
//!
//! - **Hunt** fires at a uniformly random unguessed cell.
//! - **Target** works through a queue of neighbours of recent hits, biased
//!   along the ship orientation once two hits line up.
//! - **Probability** fires at the cell covered by the most still-possible
//!   ship placements (see [`Heatmap`]).
//! - **Random** is Hunt without memory or feedback; an engine built with
//!   [`TargetingEngine::naive`] stays there for the whole game.
//!
//! Mode policy: start in Hunt; any hit switches to Target; enough
//! consecutive Hunt misses escalate to Probability; a sunk ship returns to
//! Hunt with a clean slate.

pub mod heatmap;
pub mod target;

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::common::{AttackResult, TargetingExhausted};
use crate::core::config::GameConfig;
use crate::core::coord::Coordinate;
use crate::core::grid::BitGrid;
use crate::core::ship::Orientation;

pub use heatmap::Heatmap;
pub use target::{TargetEntry, TargetQueue, ALIGNED_PRIORITY, BASE_PRIORITY};

/// Targeting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Random,
    Hunt,
    Target,
    Probability,
}

/// Decision state for attacking one board.
#[derive(Debug, Clone)]
pub struct TargetingEngine {
    ship_length: usize,
    probability_after_misses: u32,
    mode: Mode,
    queue: TargetQueue,
    /// Hits since the last sink, most recent first.
    hit_history: Vec<Coordinate>,
    orientation: Option<Orientation>,
    consecutive_misses: u32,
    hunt_picks: Vec<Coordinate>,
    heatmap: Option<Heatmap>,
}

impl TargetingEngine {
    /// Adaptive engine starting in Hunt mode.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_mode(config, Mode::Hunt)
    }

    /// Engine locked in Random mode; feedback is ignored.
    pub fn naive(config: &GameConfig) -> Self {
        Self::with_mode(config, Mode::Random)
    }

    fn with_mode(config: &GameConfig, mode: Mode) -> Self {
        TargetingEngine {
            ship_length: config.ship_length,
            probability_after_misses: config.probability_after_misses,
            mode,
            queue: TargetQueue::new(),
            hit_history: Vec::new(),
            orientation: None,
            consecutive_misses: 0,
            hunt_picks: Vec::new(),
            heatmap: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn queue(&self) -> &TargetQueue {
        &self.queue
    }

    /// Hits since the last sink, most recent first.
    pub fn hit_history(&self) -> &[Coordinate] {
        &self.hit_history
    }

    /// Orientation inferred from the two most recent hits, if they line up.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn consecutive_misses(&self) -> u32 {
        self.consecutive_misses
    }

    /// Cells chosen by Hunt selection, oldest first.
    pub fn hunt_picks(&self) -> &[Coordinate] {
        &self.hunt_picks
    }

    /// Heatmap from the most recent Probability move.
    pub fn heatmap(&self) -> Option<&Heatmap> {
        self.heatmap.as_ref()
    }

    /// Choose the next cell to fire at. `guesses` is every cell this side
    /// has already fired at; the result is never one of them.
    ///
    /// Errors only when `guesses` covers the whole board, which means the
    /// caller missed a finished game.
    pub fn select_move<R: Rng + ?Sized>(
        &mut self,
        guesses: &BitGrid,
        rng: &mut R,
    ) -> Result<Coordinate, TargetingExhausted> {
        if guesses.is_full() {
            return Err(TargetingExhausted {
                guessed: guesses.count_ones(),
                cells: guesses.capacity(),
            });
        }
        let choice = match self.mode {
            Mode::Random => random_unguessed(guesses, rng),
            Mode::Hunt => self.hunt(guesses, rng),
            Mode::Target => match self.queue.next_target(guesses) {
                Some(entry) => Some(entry.coord),
                None => {
                    debug!("target queue drained, hunting for this move");
                    self.hunt(guesses, rng)
                }
            },
            Mode::Probability => {
                let heatmap = Heatmap::compute(self.ship_length, guesses);
                let best = heatmap.best().choose(rng).copied();
                self.heatmap = Some(heatmap);
                match best {
                    Some(coord) => Some(coord),
                    None => {
                        debug!("heatmap exhausted, hunting for this move");
                        self.hunt(guesses, rng)
                    }
                }
            }
        };
        choice.ok_or(TargetingExhausted {
            guessed: guesses.count_ones(),
            cells: guesses.capacity(),
        })
    }

    /// Feed back the result of firing at `coord`. `guesses` must already
    /// include `coord`.
    pub fn record_result(&mut self, coord: Coordinate, result: AttackResult, guesses: &BitGrid) {
        if self.mode == Mode::Random {
            return;
        }
        if result.sunk {
            debug!("{} sank a ship, {:?} -> Hunt", coord, self.mode);
            self.reset();
        } else if result.hit {
            if self.mode != Mode::Target {
                debug!("hit at {}, {:?} -> Target", coord, self.mode);
            }
            self.mode = Mode::Target;
            self.consecutive_misses = 0;
            self.register_hit(coord, guesses);
        } else if self.mode == Mode::Hunt {
            self.consecutive_misses += 1;
            if self.consecutive_misses >= self.probability_after_misses {
                debug!(
                    "{} consecutive misses, Hunt -> Probability",
                    self.consecutive_misses
                );
                self.mode = Mode::Probability;
            }
        }
    }

    /// Record a non-sinking hit: queue its neighbours and, if it lines up
    /// with the previous hit, bias the queue along that line.
    pub fn register_hit(&mut self, coord: Coordinate, guesses: &BitGrid) {
        self.hit_history.insert(0, coord);
        self.add_targets(coord, guesses);
        if self.hit_history.len() >= 2 {
            let (latest, previous) = (self.hit_history[0], self.hit_history[1]);
            self.orientation = if latest.row == previous.row {
                Some(Orientation::Horizontal)
            } else if latest.col == previous.col {
                Some(Orientation::Vertical)
            } else {
                None
            };
            match self.orientation {
                Some(Orientation::Horizontal) => {
                    self.queue.elevate(Orientation::Horizontal, latest.row)
                }
                Some(Orientation::Vertical) => self.queue.elevate(Orientation::Vertical, latest.col),
                None => {}
            }
            debug!("orientation after {}: {:?}", coord, self.orientation);
        }
    }

    /// Queue the neighbours of `coord`, favouring the inferred orientation.
    pub fn add_targets(&mut self, coord: Coordinate, guesses: &BitGrid) -> usize {
        let added = self.queue.add_targets(coord, guesses, self.orientation);
        debug!("queued {} targets around {}: {:?}", added, coord, self.queue.coords());
        added
    }

    /// Back to Hunt with an empty queue, history and miss streak.
    pub fn reset(&mut self) {
        self.mode = Mode::Hunt;
        self.queue.clear();
        self.hit_history.clear();
        self.orientation = None;
        self.consecutive_misses = 0;
    }

    fn hunt<R: Rng + ?Sized>(&mut self, guesses: &BitGrid, rng: &mut R) -> Option<Coordinate> {
        let pick = random_unguessed(guesses, rng)?;
        self.hunt_picks.push(pick);
        Some(pick)
    }
}

fn random_unguessed<R: Rng + ?Sized>(guesses: &BitGrid, rng: &mut R) -> Option<Coordinate> {
    let open: Vec<Coordinate> = guesses.iter_unset().collect();
    open.choose(rng).copied()
}
