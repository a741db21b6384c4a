//! Text rendering of boards and heatmaps.

use std::fmt::Write;

use crate::core::{Board, CellState, Coordinate, Heatmap, Symbols};

/// Whose eyes a board is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// The board's owner: ships are visible.
    Owner,
    /// The opponent: unhit ship cells look like water.
    Opponent,
}

/// Symbol for one cell as seen by `viewer`.
pub fn cell_symbol(state: CellState, symbols: &Symbols, viewer: Viewer) -> char {
    match state {
        CellState::Water => symbols.water,
        CellState::ShipVisible if viewer == Viewer::Owner => symbols.ship,
        CellState::ShipVisible => symbols.water,
        CellState::Hit => symbols.hit,
        CellState::Miss => symbols.miss,
    }
}

/// Header line of column indices, then one line per row.
pub fn render_board(board: &Board, symbols: &Symbols, viewer: Viewer) -> String {
    let size = board.size();
    let mut out = String::from("  ");
    for c in 0..size {
        let _ = write!(out, "{} ", c);
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    for r in 0..size {
        let _ = write!(out, "{} ", r);
        let row: Vec<String> = (0..size)
            .map(|c| {
                let state = board.cell(Coordinate::new(r, c)).unwrap_or_default();
                cell_symbol(state, symbols, viewer).to_string()
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// The opponent's board (left) and the viewer's own board (right).
pub fn render_boards(opponent: &Board, own: &Board, symbols: &Symbols) -> String {
    let left = render_board(opponent, symbols, Viewer::Opponent);
    let right = render_board(own, symbols, Viewer::Owner);
    let width = left.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = format!("{:<width$}     {}\n", "--- OPPONENT BOARD ---", "--- YOUR BOARD ---", width = width.max(22));
    for (l, r) in left.lines().zip(right.lines()) {
        let _ = writeln!(out, "{:<width$}     {}", l, r, width = width.max(22));
    }
    out
}

/// Normalized heatmap scores, one row per line.
pub fn render_heatmap(heatmap: &Heatmap) -> String {
    let size = heatmap.size();
    let mut out = String::from("\nProbability distribution:\n   ");
    for c in 0..size {
        let _ = write!(out, " {:>4}", c);
    }
    out.push('\n');
    for r in 0..size {
        let _ = write!(out, "{:2} ", r);
        for c in 0..size {
            let _ = write!(out, " {:4.2}", heatmap.score(Coordinate::new(r, c)));
        }
        out.push('\n');
    }
    out
}
