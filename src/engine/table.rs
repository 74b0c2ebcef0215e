use fxhash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub evaluation: i32,
    pub node_type: NodeType,
}

/// Search results of positions already visited, keyed by remaining depth and
/// position hash.
///
/// The hash does not encode the side to move. Within one search the depth
/// fixes it, which is why the table must be cleared between searches.
#[derive(Default)]
pub struct TranspositionTable {
    entries: FxHashMap<(u8, u64), TTEntry>,
    hits: u64,
    misses: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&mut self, depth: u8, key: u64) -> Option<TTEntry> {
        match self.entries.get(&(depth, key)) {
            Some(entry) => {
                self.hits += 1;
                Some(*entry)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn store(&mut self, depth: u8, key: u64, evaluation: i32, node_type: NodeType) {
        self.entries.insert(
            (depth, key),
            TTEntry {
                evaluation,
                node_type,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_hit_rate_percent(&self) -> u64 {
        let total = self.hits + self.misses;

        if total == 0 { 0 } else { (self.hits * 100) / total }
    }
}
