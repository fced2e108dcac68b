//! Tunable parameters for the search and the static evaluation

use std::time::Duration;

/// Weights of the static evaluation
///
/// Only the ordering matters for play strength:
/// `block_three > double_threat > open_three > open_two > open_one`.
/// Blocking is weighted well above attacking because the opponent moves next.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EvalWeights {
    /// bottom disc of the centre column
    pub center_column: i32,
    /// bottom disc of any other column
    pub other_column: i32,
    /// extra bonus when that disc sits on an odd row (counted from the top)
    pub odd_row: i32,
    pub open_three: i32,
    pub block_three: i32,
    pub open_two: i32,
    pub open_one: i32,
    pub double_threat: i32,
}

impl EvalWeights {
    pub fn is_well_ordered(&self) -> bool {
        self.block_three > self.double_threat
            && self.double_threat > self.open_three
            && self.open_three > self.open_two
            && self.open_two > self.open_one
            && self.open_one > 0
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            center_column: 100,
            other_column: 50,
            odd_row: 50,
            open_three: 1000,
            block_three: 10000,
            open_two: 200,
            open_one: 50,
            double_threat: 5000,
        }
    }
}

/// Settings for one engine session
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchConfig {
    /// Wall-clock budget per move, checked between depths
    pub time_budget: Duration,
    /// Deepest iterative-deepening pass
    pub max_depth: u32,
    /// Number of transposition table slots
    pub table_size: usize,
    /// Root ordering bonus for the centre column
    pub center_bonus: i32,
    /// Seed for the Zobrist keys, random per session when `None`
    pub seed: Option<u64>,
    pub weights: EvalWeights,
}

impl SearchConfig {
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(1500),
            max_depth: 12,
            table_size: 1 << 20,
            center_bonus: 10,
            seed: None,
            weights: EvalWeights::default(),
        }
    }
}
