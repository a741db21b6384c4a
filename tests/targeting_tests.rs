use broadside::{
    AttackResult, BitGrid, Coordinate, GameConfig, Heatmap, Mode, Orientation, TargetingEngine,
    TargetingExhausted, ALIGNED_PRIORITY, BASE_PRIORITY,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

const HIT: AttackResult = AttackResult {
    hit: true,
    sunk: false,
    ship: Some(0),
};

const SUNK: AttackResult = AttackResult {
    hit: true,
    sunk: true,
    ship: Some(0),
};

/// Mark `coord` as guessed and feed `result` to the engine, the way the
/// coordinator does.
fn fire(engine: &mut TargetingEngine, guesses: &mut BitGrid, coord: Coordinate, result: AttackResult) {
    guesses.set(coord).unwrap();
    engine.record_result(coord, result, guesses);
}

#[test]
fn test_hit_queues_neighbours_in_order() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    assert_eq!(engine.mode(), Mode::Hunt);

    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    assert_eq!(engine.mode(), Mode::Target);
    assert_eq!(
        engine.queue().coords(),
        vec![c(4, 5), c(6, 5), c(5, 4), c(5, 6)]
    );
    assert_eq!(engine.hit_history(), &[c(5, 5)]);
    assert_eq!(engine.orientation(), None);
}

#[test]
fn test_corner_hit_skips_off_board() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    fire(&mut engine, &mut guesses, c(0, 0), HIT);
    assert_eq!(engine.queue().coords(), vec![c(1, 0), c(0, 1)]);
}

#[test]
fn test_guessed_and_queued_neighbours_not_requeued() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    guesses.set(c(4, 5)).unwrap();
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    assert_eq!(engine.queue().coords(), vec![c(6, 5), c(5, 4), c(5, 6)]);

    // nothing new around 55 once its neighbours are queued or guessed
    assert_eq!(engine.add_targets(c(5, 5), &guesses), 0);
    assert_eq!(engine.queue().len(), 3);
}

#[test]
fn test_horizontal_hits_elevate_row() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    fire(&mut engine, &mut guesses, c(5, 6), HIT);

    assert_eq!(engine.orientation(), Some(Orientation::Horizontal));
    assert_eq!(engine.hit_history(), &[c(5, 6), c(5, 5)]);
    assert_eq!(
        engine.queue().coords(),
        vec![c(5, 4), c(5, 6), c(5, 7), c(4, 5), c(6, 5), c(4, 6), c(6, 6)]
    );

    let on_row = engine.queue().iter().filter(|e| e.coord.row == 5);
    let off_row = engine.queue().iter().filter(|e| e.coord.row != 5);
    let min_on = on_row.map(|e| e.priority).min().unwrap();
    let max_off = off_row.map(|e| e.priority).max().unwrap();
    assert_eq!(min_on, ALIGNED_PRIORITY);
    assert_eq!(max_off, BASE_PRIORITY);
    assert!(min_on > max_off);

    // later targets along the axis go in at aligned priority
    engine.add_targets(c(5, 7), &guesses);
    assert_eq!(
        engine.queue().coords(),
        vec![
            c(5, 4),
            c(5, 6),
            c(5, 7),
            c(5, 8),
            c(4, 5),
            c(6, 5),
            c(4, 6),
            c(6, 6),
            c(4, 7),
            c(6, 7)
        ]
    );
}

#[test]
fn test_vertical_hits_elevate_column() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    fire(&mut engine, &mut guesses, c(4, 5), HIT);

    assert_eq!(engine.orientation(), Some(Orientation::Vertical));
    assert_eq!(
        engine.queue().coords(),
        vec![c(4, 5), c(6, 5), c(3, 5), c(5, 4), c(5, 6), c(4, 4), c(4, 6)]
    );
}

#[test]
fn test_target_pops_and_skips_guessed() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    let mut rng = SmallRng::seed_from_u64(0);
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    fire(&mut engine, &mut guesses, c(5, 6), HIT);

    let first = engine.select_move(&guesses, &mut rng).unwrap();
    assert_eq!(first, c(5, 4));
    fire(&mut engine, &mut guesses, first, AttackResult::MISS);
    // misses outside Hunt do not count towards escalation
    assert_eq!(engine.mode(), Mode::Target);
    assert_eq!(engine.consecutive_misses(), 0);

    // 56 is still queued but already guessed
    let second = engine.select_move(&guesses, &mut rng).unwrap();
    assert_eq!(second, c(5, 7));
    assert!(engine.hunt_picks().is_empty());
}

#[test]
fn test_drained_queue_hunts_without_leaving_target() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    let mut rng = SmallRng::seed_from_u64(9);
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    for coord in [c(4, 5), c(6, 5), c(5, 4), c(5, 6)] {
        guesses.set(coord).unwrap();
    }

    let pick = engine.select_move(&guesses, &mut rng).unwrap();
    assert!(!guesses.contains(pick));
    assert_eq!(engine.mode(), Mode::Target);
    assert!(engine.queue().is_empty());
    assert_eq!(engine.hunt_picks(), &[pick]);
}

#[test]
fn test_sunk_resets_to_hunt() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    fire(&mut engine, &mut guesses, c(5, 6), HIT);
    fire(&mut engine, &mut guesses, c(5, 7), SUNK);

    assert_eq!(engine.mode(), Mode::Hunt);
    assert!(engine.queue().is_empty());
    assert!(engine.hit_history().is_empty());
    assert_eq!(engine.orientation(), None);
    assert_eq!(engine.consecutive_misses(), 0);
}

#[test]
fn test_hunt_misses_escalate_to_probability() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    fire(&mut engine, &mut guesses, c(0, 0), AttackResult::MISS);
    fire(&mut engine, &mut guesses, c(0, 1), AttackResult::MISS);
    assert_eq!(engine.mode(), Mode::Hunt);
    assert_eq!(engine.consecutive_misses(), 2);

    fire(&mut engine, &mut guesses, c(0, 2), AttackResult::MISS);
    assert_eq!(engine.mode(), Mode::Probability);

    // a hit from Probability switches to Target and clears the streak
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    assert_eq!(engine.mode(), Mode::Target);
    assert_eq!(engine.consecutive_misses(), 0);

    fire(&mut engine, &mut guesses, c(5, 6), SUNK);
    assert_eq!(engine.mode(), Mode::Hunt);
}

#[test]
fn test_hit_breaks_miss_streak() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    fire(&mut engine, &mut guesses, c(0, 0), AttackResult::MISS);
    fire(&mut engine, &mut guesses, c(0, 1), AttackResult::MISS);
    fire(&mut engine, &mut guesses, c(5, 5), SUNK);
    fire(&mut engine, &mut guesses, c(0, 2), AttackResult::MISS);
    assert_eq!(engine.mode(), Mode::Hunt);
    assert_eq!(engine.consecutive_misses(), 1);
}

#[test]
fn test_heatmap_counts_open_board() {
    let guesses = BitGrid::new(10);
    let heatmap = Heatmap::compute(3, &guesses);
    assert_eq!(heatmap.count(c(0, 0)), 2);
    assert_eq!(heatmap.count(c(0, 1)), 3);
    assert_eq!(heatmap.count(c(4, 4)), 6);
    assert_eq!(heatmap.max_count(), 6);
    assert_eq!(heatmap.score(c(4, 4)), 1.0);
    assert!(heatmap.score(c(0, 0)) < heatmap.score(c(4, 4)));

    let best = heatmap.best();
    assert_eq!(best.len(), 36);
    assert!(best
        .iter()
        .all(|p| (2..=7).contains(&p.row) && (2..=7).contains(&p.col)));
}

#[test]
fn test_heatmap_guessed_cell_invalidates_windows() {
    let guesses = BitGrid::from_iter(10, [c(4, 4)]).unwrap();
    let heatmap = Heatmap::compute(3, &guesses);
    assert_eq!(heatmap.count(c(4, 4)), 0);
    // only 41-42-43 survives horizontally
    assert_eq!(heatmap.count(c(4, 3)), 4);
    assert!(!heatmap.best().contains(&c(4, 4)));
}

#[test]
fn test_probability_picks_from_best() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    let mut rng = SmallRng::seed_from_u64(5);
    for coord in [c(0, 0), c(0, 1), c(0, 2)] {
        fire(&mut engine, &mut guesses, coord, AttackResult::MISS);
    }
    assert_eq!(engine.mode(), Mode::Probability);

    let expected = Heatmap::compute(3, &guesses);
    for _ in 0..20 {
        let pick = engine.select_move(&guesses, &mut rng).unwrap();
        assert!(expected.best().contains(&pick));
        assert!((2..=7).contains(&pick.row) && (2..=7).contains(&pick.col));
    }
    assert_eq!(engine.heatmap(), Some(&expected));
    assert!(engine.hunt_picks().is_empty());
}

#[test]
fn test_probability_falls_back_when_no_window_fits() {
    let config = GameConfig {
        board_size: 3,
        num_ships: 1,
        ship_length: 3,
        probability_after_misses: 1,
        ..GameConfig::default()
    };
    let mut engine = TargetingEngine::new(&config);
    let mut guesses = BitGrid::new(3);
    let mut rng = SmallRng::seed_from_u64(2);
    fire(&mut engine, &mut guesses, c(1, 1), AttackResult::MISS);
    assert_eq!(engine.mode(), Mode::Probability);
    for coord in [c(0, 1), c(0, 2), c(1, 0), c(1, 2), c(2, 0), c(2, 1)] {
        guesses.set(coord).unwrap();
    }

    let pick = engine.select_move(&guesses, &mut rng).unwrap();
    assert!(pick == c(0, 0) || pick == c(2, 2));
    assert_eq!(engine.mode(), Mode::Probability);
    assert_eq!(engine.heatmap().map(Heatmap::max_count), Some(0));
    assert_eq!(engine.hunt_picks(), &[pick]);
}

#[test]
fn test_exhausted_board_is_an_error() {
    let mut engine = TargetingEngine::new(&GameConfig::default());
    let mut rng = SmallRng::seed_from_u64(0);
    let guesses = BitGrid::from_iter(10, Coordinate::all(10)).unwrap();
    assert_eq!(
        engine.select_move(&guesses, &mut rng),
        Err(TargetingExhausted {
            guessed: 100,
            cells: 100
        })
    );
}

#[test]
fn test_hunt_never_repeats() {
    let config = GameConfig {
        board_size: 4,
        ..GameConfig::default()
    };
    let mut engine = TargetingEngine::new(&config);
    let mut guesses = BitGrid::new(4);
    let mut rng = SmallRng::seed_from_u64(77);
    for _ in 0..16 {
        let pick = engine.select_move(&guesses, &mut rng).unwrap();
        assert!(!guesses.contains(pick));
        fire(&mut engine, &mut guesses, pick, AttackResult::MISS);
    }
    assert!(guesses.is_full());
}

#[test]
fn test_naive_engine_ignores_feedback() {
    let mut engine = TargetingEngine::naive(&GameConfig::default());
    let mut guesses = BitGrid::new(10);
    let mut rng = SmallRng::seed_from_u64(3);
    fire(&mut engine, &mut guesses, c(5, 5), HIT);
    for coord in [c(0, 0), c(0, 1), c(0, 2)] {
        fire(&mut engine, &mut guesses, coord, AttackResult::MISS);
    }
    assert_eq!(engine.mode(), Mode::Random);
    assert!(engine.queue().is_empty());
    assert!(engine.hit_history().is_empty());

    let pick = engine.select_move(&guesses, &mut rng).unwrap();
    assert!(!guesses.contains(pick));
}
