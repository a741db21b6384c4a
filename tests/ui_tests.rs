use broadside::ui::{cell_symbol, render_board, render_boards, render_heatmap, Viewer};
use broadside::{BitGrid, Board, CellState, Coordinate, Heatmap, Orientation, Ship, Symbols};

fn sample_board() -> Board {
    let mut board = Board::new(3);
    board
        .place_ship(Ship::new(Coordinate::new(0, 0), Orientation::Horizontal, 2).unwrap())
        .unwrap();
    board.attack(Coordinate::new(0, 1)).unwrap();
    board.attack(Coordinate::new(2, 2)).unwrap();
    board
}

#[test]
fn test_owner_sees_ships() {
    let text = render_board(&sample_board(), &Symbols::default(), Viewer::Owner);
    assert_eq!(text, "  0 1 2\n0 S X ~\n1 ~ ~ ~\n2 ~ ~ o\n");
}

#[test]
fn test_opponent_view_hides_ships() {
    let text = render_board(&sample_board(), &Symbols::default(), Viewer::Opponent);
    assert_eq!(text, "  0 1 2\n0 ~ X ~\n1 ~ ~ ~\n2 ~ ~ o\n");
}

#[test]
fn test_custom_symbols() {
    let symbols = Symbols {
        water: '.',
        ship: '#',
        hit: '*',
        miss: '-',
    };
    assert_eq!(cell_symbol(CellState::ShipVisible, &symbols, Viewer::Owner), '#');
    assert_eq!(cell_symbol(CellState::ShipVisible, &symbols, Viewer::Opponent), '.');
    assert_eq!(cell_symbol(CellState::Miss, &symbols, Viewer::Opponent), '-');
    let text = render_board(&sample_board(), &symbols, Viewer::Owner);
    assert!(text.starts_with("  0 1 2\n0 # * .\n"));
}

#[test]
fn test_side_by_side() {
    let board = sample_board();
    let text = render_boards(&board, &board, &Symbols::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("--- OPPONENT BOARD ---"));
    assert!(lines[0].ends_with("--- YOUR BOARD ---"));
    assert!(lines[2].starts_with("0 ~ X ~"));
    assert!(lines[2].ends_with("0 S X ~"));
}

#[test]
fn test_heatmap_rows() {
    let heatmap = Heatmap::compute(3, &BitGrid::new(3));
    let text = render_heatmap(&heatmap);
    assert!(text.contains("Probability distribution:"));
    // the centre is covered by one window each way, like every cell on 3x3
    assert_eq!(text.matches("1.00").count(), 9);
}
