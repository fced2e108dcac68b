//! Iterative-deepening minimax search with alpha-beta pruning

use log::debug;

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Player, Position},
    config::SearchConfig,
    evaluation::evaluate,
    transposition_table::*,
    zobrist::Zobrist,
    HEIGHT, WIDTH,
};

/// Score of a position won for the maximizer at the root, reduced by one
/// per ply so that quicker wins and slower losses are preferred
pub const WIN_SCORE: i32 = 10_000_000;

/// Bound of every reachable score, used as the initial search window
pub const SCORE_BOUND: i32 = WIN_SCORE + 1;

const MAX_PLY: i32 = (WIDTH * HEIGHT) as i32;

/// Whether `score` is a forced win or loss rather than a heuristic value
pub fn is_decisive(score: i32) -> bool {
    score.abs() >= WIN_SCORE - MAX_PLY
}

/// Number of plies until the forced result behind a decisive `score`
pub fn plies_to_result(score: i32) -> Option<i32> {
    if is_decisive(score) {
        Some(WIN_SCORE - score.abs())
    } else {
        None
    }
}

// mate scores are stored relative to the node so they stay valid at any ply
fn score_to_table(score: i32, ply: i32) -> i32 {
    if score >= WIN_SCORE - MAX_PLY {
        score + ply
    } else if score <= -(WIN_SCORE - MAX_PLY) {
        score - ply
    } else {
        score
    }
}

fn score_from_table(score: i32, ply: i32) -> i32 {
    if score >= WIN_SCORE - MAX_PLY {
        score - ply
    } else if score <= -(WIN_SCORE - MAX_PLY) {
        score + ply
    } else {
        score
    }
}

struct MoveSorter {
    size: usize,
    // column and score
    moves: [(usize, i32); WIDTH],
}

impl MoveSorter {
    pub fn new() -> Self {
        Self {
            size: 0,
            moves: [(0, 0); WIDTH],
        }
    }
    pub fn push(&mut self, column: usize, score: i32) {
        let mut pos = self.size;
        self.size += 1;
        while pos != 0 && self.moves[pos - 1].1 > score {
            self.moves[pos] = self.moves[pos - 1];
            pos -= 1;
        }
        self.moves[pos] = (column, score);
    }
}

impl Iterator for MoveSorter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match self.size {
            0 => None,
            _ => {
                self.size -= 1;
                Some(self.moves[self.size].0)
            }
        }
    }
}

/// Returns a slice ordering the columns from the middle outwards, as
/// the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) + (i % 2) * (i / 2 + 1) - (1 - i % 2) * (i / 2);
        i += 1;
    }
    move_order
}

/// Cumulative root success of each column over a game session
#[derive(Clone, Debug, Default)]
pub struct HistoryTable {
    weights: [u32; WIDTH],
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `column` for improving the root result of a `depth` ply search
    pub fn reward(&mut self, column: usize, depth: u32) {
        self.weights[column] = self.weights[column].saturating_add(depth * depth);
    }

    pub fn weight(&self, column: usize) -> u32 {
        self.weights[column]
    }

    pub fn clear(&mut self) {
        self.weights = [0; WIDTH];
    }
}

/// Everything a search mutates, owned by exactly one engine session
#[derive(Clone)]
pub struct SearchState {
    pub zobrist: Zobrist,
    pub table: TranspositionTable,
    pub history: HistoryTable,
    /// best root column of the latest pass at each depth
    pub killers: Vec<Option<usize>>,
    /// The number of nodes searched in this session so far (for diagnostics only)
    pub node_count: u64,
}

impl SearchState {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            zobrist: Zobrist::new(config.seed),
            table: TranspositionTable::new(config.table_size),
            history: HistoryTable::new(),
            // no pass goes deeper than the board has empty cells
            killers: vec![None; config.max_depth.min(MAX_PLY as u32) as usize + 1],
            node_count: 0,
        }
    }

    /// Forgets everything learned this game and draws new Zobrist keys
    pub fn reset(&mut self, config: &SearchConfig) {
        self.zobrist = Zobrist::new(config.seed);
        self.table.clear();
        self.history.clear();
        for killer in self.killers.iter_mut() {
            *killer = None;
        }
        self.node_count = 0;
    }

    pub fn killer(&self, depth: u32) -> Option<usize> {
        self.killers.get(depth as usize).copied().flatten()
    }
}

/// The outcome of one completed depth
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub column: usize,
    /// in the maximizer's favour
    pub score: i32,
    pub depth: u32,
    /// nodes visited during this depth
    pub nodes: u64,
    /// time since the search started
    pub elapsed: Duration,
}

/// An iterative-deepening search over one position
///
/// Each call to `next` runs one complete alpha-beta pass one ply deeper than
/// the last and yields its result, so a caller can stop or yield control
/// between depths. Iteration ends once the time budget is spent, the depth
/// cap or the end of the game is reached, or a forced win has been found.
pub struct IterativeDeepening<'a> {
    state: &'a mut SearchState,
    config: &'a SearchConfig,
    board: Board,
    maximizer: Player,
    depth: u32,
    start: Instant,
    best: Option<SearchResult>,
    finished: bool,
}

impl<'a> IterativeDeepening<'a> {
    pub fn new(
        state: &'a mut SearchState,
        config: &'a SearchConfig,
        board: Board,
        maximizer: Player,
    ) -> Self {
        Self {
            state,
            config,
            board,
            maximizer,
            depth: 1,
            start: Instant::now(),
            best: None,
            finished: false,
        }
    }

    /// The result of the deepest completed pass
    pub fn best(&self) -> Option<SearchResult> {
        self.best
    }

    /// Runs to completion and returns the deepest result
    pub fn run(mut self) -> Option<SearchResult> {
        while self.next().is_some() {}
        self.best
    }

    fn should_stop(&self) -> bool {
        let empty_cells = (WIDTH * HEIGHT - self.board.disc_count()) as u32;
        self.depth > self.config.max_depth
            || self.depth > empty_cells
            || self.start.elapsed() >= self.config.time_budget
            || self
                .best
                .map_or(false, |best| best.score >= WIN_SCORE - MAX_PLY)
    }

    /// One full alpha-beta pass from the root at the current depth
    fn search_root(&mut self) -> Option<(usize, i32)> {
        let depth = self.depth;
        let mut moves = MoveSorter::new();
        // pushing edges first leaves the centre on top of equal scores
        for &column in move_order().iter().rev() {
            if self.board.is_legal_move(column) {
                let mut score = self.state.history.weight(column) as i32;
                if column == WIDTH / 2 {
                    score += self.config.center_bonus;
                }
                moves.push(column, score);
            }
        }

        let root_hash = self
            .state
            .zobrist
            .hash(&self.board, self.maximizer, self.maximizer);
        let mut alpha = -SCORE_BOUND;
        let beta = SCORE_BOUND;
        let mut best: Option<(usize, i32)> = None;

        for column in moves {
            let row = match self.board.lowest_empty_row(column) {
                Some(row) => row,
                None => continue,
            };
            let position = Position::new(row, column);
            let child = self.board.with_disc(position, self.maximizer);
            let child_hash = self
                .state
                .zobrist
                .update(root_hash, position, self.maximizer);

            let score = self.minimax(&child, position, child_hash, depth - 1, false, alpha, beta, 1);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
                self.state.history.reward(column, depth);
            }
            if score > alpha {
                alpha = score;
            }
        }

        if let Some((column, _)) = best {
            if let Some(slot) = self.state.killers.get_mut(depth as usize) {
                *slot = Some(column);
            }
        }
        best
    }

    /// Scores `board` from the maximizer's point of view
    ///
    /// `last` is the disc that was just placed, `maximizing` tells whose turn
    /// it is now.
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &Board,
        last: Position,
        hash: u64,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        ply: i32,
    ) -> i32 {
        self.state.node_count += 1;

        // only the disc just placed can have completed a line
        if board.completes_four(last) {
            return if board.get(last) == self.maximizer.cell() {
                WIN_SCORE - ply
            } else {
                -WIN_SCORE + ply
            };
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate(board, self.maximizer, &self.config.weights);
        }

        let table_depth = depth.min(u8::MAX as u32) as u8;
        if let Some(score) = self.state.table.probe(
            hash,
            table_depth,
            score_to_table(alpha, ply),
            score_to_table(beta, ply),
        ) {
            return score_from_table(score, ply);
        }

        let original_alpha = alpha;
        let original_beta = beta;
        let to_move = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let mut best = if maximizing { -SCORE_BOUND } else { SCORE_BOUND };

        for &column in move_order().iter() {
            let row = match board.lowest_empty_row(column) {
                Some(row) => row,
                None => continue,
            };
            let position = Position::new(row, column);
            let child = board.with_disc(position, to_move);
            let child_hash = self.state.zobrist.update(hash, position, to_move);

            let score = self.minimax(&child, position, child_hash, depth - 1, !maximizing, alpha, beta, ply + 1);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            // the opponent will never let the game reach this branch
            if beta <= alpha {
                break;
            }
        }

        let bound = if best <= original_alpha {
            Bound::UpperBound
        } else if best >= original_beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };
        self.state
            .table
            .set(hash, table_depth, score_to_table(best, ply), bound);
        best
    }
}

impl<'a> Iterator for IterativeDeepening<'a> {
    type Item = SearchResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.should_stop() {
            self.finished = true;
            return None;
        }

        let nodes_before = self.state.node_count;
        let (column, score) = match self.search_root() {
            Some(best) => best,
            // no legal moves, nothing deeper to find
            None => {
                self.finished = true;
                return None;
            }
        };

        let result = SearchResult {
            column,
            score,
            depth: self.depth,
            nodes: self.state.node_count - nodes_before,
            elapsed: self.start.elapsed(),
        };
        debug!(
            "depth {} complete: column {}, score {}, {} nodes, {:.1}ms",
            result.depth,
            result.column,
            result.score,
            result.nodes,
            result.elapsed.as_secs_f64() * 1000.0
        );

        self.best = Some(result);
        self.depth += 1;
        Some(result)
    }
}
