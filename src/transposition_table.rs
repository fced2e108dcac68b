/// How a stored score relates to the true value of the position
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Bound {
    /// the search finished inside its window
    Exact,
    /// a cut-off happened, the true value is at least the score
    LowerBound,
    /// every move failed low, the true value is at most the score
    UpperBound,
}

#[derive(Copy, Clone, Debug)]
pub struct Entry {
    pub key: u64,
    pub score: i32,
    /// 0 marks an unused slot, stored searches are always at least 1 deep
    pub depth: u8,
    pub bound: Bound,
}

impl Entry {
    pub fn new() -> Self {
        Self {
            key: 0,
            score: 0,
            depth: 0,
            bound: Bound::Exact,
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

/// A direct-mapped cache of search results keyed by Zobrist hash
#[derive(Clone)]
pub struct TranspositionTable {
    entries: Vec<Entry>,
}

impl TranspositionTable {
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![Entry::new(); size.max(1)],
        }
    }

    /// Stores a result, keeping a deeper result for another position
    /// in the same slot
    pub fn set(&mut self, key: u64, depth: u8, score: i32, bound: Bound) {
        let len = self.entries.len();
        let slot = &mut self.entries[key as usize % len];
        if slot.depth != 0 && slot.key != key && slot.depth > depth {
            return;
        }
        *slot = Entry {
            key,
            score,
            depth,
            bound,
        };
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        let entry = self.entries[key as usize % self.entries.len()];
        if entry.depth != 0 && entry.key == key {
            Some(entry)
        } else {
            None
        }
    }

    /// Returns a score that settles the node for a search of `depth` plies
    /// within `(alpha, beta)`, if one is stored
    pub fn probe(&self, key: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.get(key)?;
        if entry.depth < depth {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::LowerBound if entry.score >= beta => Some(entry.score),
            Bound::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = Entry::new();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.depth != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}
