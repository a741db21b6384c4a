use std::collections::HashSet;

use broadside::{Board, BoardError, BoardState, Coordinate, GameConfig, PlacementEngine};
use proptest::prelude::*;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

fn random_board(config: &GameConfig, seed: u64) -> (Board, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(config.board_size);
    PlacementEngine::new(config)
        .place_fleet(&mut board, &mut rng)
        .unwrap();
    (board, rng)
}

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (6usize..=10, 1usize..=3, 1usize..=4).prop_map(|(board_size, num_ships, ship_length)| {
        GameConfig {
            board_size,
            num_ships,
            ship_length,
            ..GameConfig::default()
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_is_straight_in_bounds_and_disjoint(config in config_strategy(), seed in any::<u64>()) {
        let (board, _) = random_board(&config, seed);
        prop_assert_eq!(board.ships().len(), config.num_ships);

        let mut seen = HashSet::new();
        for ship in board.ships() {
            let cells = ship.cells();
            prop_assert_eq!(cells.len(), config.ship_length);
            let first = cells[0];
            let same_row = cells.iter().enumerate().all(|(i, c)| c.row == first.row && c.col == first.col + i);
            let same_col = cells.iter().enumerate().all(|(i, c)| c.col == first.col && c.row == first.row + i);
            prop_assert!(same_row || same_col, "not a straight run: {:?}", cells);
            for cell in cells {
                prop_assert!(cell.in_bounds(config.board_size));
                prop_assert!(seen.insert(*cell), "cell {} shared by two ships", cell);
            }
        }
    }

    #[test]
    fn attack_once_then_rejected(seed in any::<u64>(), row in 0usize..10, col in 0usize..10) {
        let (mut board, _) = random_board(&GameConfig::default(), seed);
        let coord = Coordinate::new(row, col);
        let before = board.state();
        board.attack(coord).unwrap();
        let after = board.state();
        prop_assert_ne!(&before, &after);
        prop_assert_eq!(before.hits + before.misses + 1, after.hits + after.misses);

        let err = board.attack(coord).unwrap_err();
        prop_assert_eq!(err, BoardError::AlreadyAttacked(coord));
        prop_assert_eq!(board.state(), after);
    }

    #[test]
    fn restored_board_replays_identically(seed in any::<u64>()) {
        let (mut board, mut rng) = random_board(&GameConfig::default(), seed);
        let mut order: Vec<Coordinate> = Coordinate::all(10).collect();
        order.shuffle(&mut rng);
        let played = rng.random_range(0..order.len());
        for coord in &order[..played] {
            board.attack(*coord).unwrap();
        }

        let bytes = bincode::serialize(&BoardState::from(&board)).unwrap();
        let decoded: BoardState = bincode::deserialize(&bytes).unwrap();
        let mut restored = Board::from_state(decoded).unwrap();
        prop_assert_eq!(&restored, &board);

        for coord in &order[played..] {
            prop_assert_eq!(restored.attack(*coord), board.attack(*coord));
        }
        prop_assert!(board.all_ships_sunk());
        prop_assert!(restored.all_ships_sunk());
    }
}
