//! Detection of open three-in-a-rows

use crate::board::{Board, Cell, Player, LINES};

/// Finds every line holding three of `player`'s discs whose fourth cell can
/// be filled this turn, returning the column of that cell
///
/// A column is reported once per qualifying line, so it may appear more than
/// once.
pub fn find_open_threats(board: &Board, player: Player) -> Vec<usize> {
    let mut threats = Vec::new();

    for line in LINES.iter() {
        let mut count = 0;
        let mut gap = None;
        for &position in line.cells.iter() {
            match board.get(position) {
                Cell::Empty => gap = Some(position),
                cell if cell == player.cell() => count += 1,
                _ => {}
            }
        }
        // three discs and a gap means the fourth cell is the gap
        if count == 3 {
            if let Some(gap) = gap {
                if board.is_playable(gap) {
                    threats.push(gap.column);
                }
            }
        }
    }
    threats
}

/// Columns where `player` completes four with their next disc
pub fn winning_moves(board: &Board, player: Player) -> Vec<usize> {
    board
        .legal_moves()
        .filter(|&column| board.is_winning_move(column, player))
        .collect()
}

/// Sorted, deduplicated threat columns
pub fn threat_columns(board: &Board, player: Player) -> Vec<usize> {
    let mut columns = find_open_threats(board, player);
    columns.sort_unstable();
    columns.dedup();
    columns
}
