//! Static scoring of non-terminal positions
//!
//! Scores are from the point of view of `maximizer`: positive values favour
//! the engine's side. Terminal positions (wins, full boards) are scored by
//! the search before this is reached.

use crate::{
    board::{Board, Cell, Line, Player, Position, LINES},
    config::EvalWeights,
    HEIGHT, WIDTH,
};

/// Scores `board` for `maximizer`, reads the board only
pub fn evaluate(board: &Board, maximizer: Player, weights: &EvalWeights) -> i32 {
    let mut score = positional_bias(board, maximizer, weights);

    // lines that could grow into threats, per player
    let mut maximizer_threats = 0;
    let mut minimizer_threats = 0;

    for line in LINES.iter() {
        let shape = LineShape::new(board, line, maximizer);

        if shape.own >= 2 && shape.empty >= 1 && shape.open_ends > 0 {
            maximizer_threats += 1;
        }
        if shape.opponent >= 2 && shape.empty >= 1 && shape.open_ends > 0 {
            minimizer_threats += 1;
        }

        score += shape.score(weights);
    }

    if maximizer_threats >= 2 {
        score += weights.double_threat;
    }
    if minimizer_threats >= 2 {
        score -= weights.double_threat;
    }

    score
}

/// Rewards owning the bottom disc of each column, more so in the centre
fn positional_bias(board: &Board, maximizer: Player, weights: &EvalWeights) -> i32 {
    let mut score = 0;
    for column in 0..WIDTH {
        let bottom = (0..HEIGHT)
            .rev()
            .map(|row| Position::new(row, column))
            .find(|&position| !board.get(position).is_empty());

        if let Some(position) = bottom {
            let mut bonus = if column == WIDTH / 2 {
                weights.center_column
            } else {
                weights.other_column
            };
            // the bottom disc always sits on row 5, so this applies to every column
            if position.row % 2 == 1 {
                bonus += weights.odd_row;
            }

            match board.get(position).owner() {
                Some(owner) if owner == maximizer => score += bonus,
                Some(_) => score -= bonus,
                None => {}
            }
        }
    }
    score
}

/// Disc counts of one line plus whether the cells just past each end are free
struct LineShape {
    own: u32,
    opponent: u32,
    empty: u32,
    open_ends: u32,
}

impl LineShape {
    fn new(board: &Board, line: &Line, maximizer: Player) -> Self {
        let mut shape = Self {
            own: 0,
            opponent: 0,
            empty: 0,
            open_ends: 0,
        };

        for &position in line.cells.iter() {
            match board.get(position) {
                Cell::Empty => shape.empty += 1,
                cell if cell == maximizer.cell() => shape.own += 1,
                _ => shape.opponent += 1,
            }
        }

        let before = line.cells[0].offset(line.direction, -1);
        let after = line.cells[line.cells.len() - 1].offset(line.direction, 1);
        shape.open_ends = [before, after]
            .iter()
            .filter(|end| end.map_or(false, |position| board.get(position).is_empty()))
            .count() as u32;

        shape
    }

    fn score(&self, weights: &EvalWeights) -> i32 {
        let mut score = 0;
        match (self.own, self.opponent, self.empty) {
            (3, 0, 1) if self.open_ends > 0 => score += weights.open_three,
            (0, 3, 1) if self.open_ends > 0 => score -= weights.block_three,
            (2, 0, 2) if self.open_ends == 2 => score += weights.open_two,
            (0, 2, 2) if self.open_ends == 2 => score -= weights.open_two,
            (1, 0, 3) if self.open_ends == 2 => score += weights.open_one,
            (0, 1, 3) if self.open_ends == 2 => score -= weights.open_one,
            _ => {}
        }
        score
    }
}
