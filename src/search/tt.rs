use crate::moves::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact evaluation [alpha <= score <= beta]
    Exact,
    /// Score is at least this value, i.e, beta cutoff [score >= beta]
    Lower,
    /// Score is at most this value, i.e, alpha not improved [score <= alpha]
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Move,
}

impl Default for TranspositionEntry {
    fn default() -> Self {
        Self {
            hash: Default::default(),
            depth: Default::default(),
            score: Default::default(),
            bound: Bound::Exact,
            best_move: Default::default(),
        }
    }
}

/// Always-replace transposition table. Cleared at the start of every
/// top-level search, so entries never leak between move computations.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: Vec<TranspositionEntry>,
    size: usize,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(16)
    }
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TranspositionEntry>();
        let num_entries = (size_mb.max(1) * 1024 * 1024) / entry_size;
        let size = num_entries.next_power_of_two();
        Self {
            entries: vec![TranspositionEntry::default(); size],
            size,
        }
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        hash as usize & (self.size - 1)
    }

    pub fn probe(&self, hash: u64) -> Option<&TranspositionEntry> {
        let entry = &self.entries[self.index(hash)];
        // The zero hash doubles as the empty marker.
        if entry.hash == hash && hash != 0 {
            Some(entry)
        } else {
            None
        }
    }

    pub fn store(&mut self, new_entry: TranspositionEntry) {
        let index = self.index(new_entry.hash);
        self.entries[index] = new_entry;
    }

    pub fn clear(&mut self) {
        self.entries.fill(TranspositionEntry::default());
    }
}
