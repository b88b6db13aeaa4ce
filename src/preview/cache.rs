//! Bounded frame-sequence cache with insertion-order eviction
//!
//! Entries are evicted strictly in the order they were stored. Lookups do
//! not promote an entry, so the sequence backing a playing preview can be
//! evicted if it happens to be the oldest one.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use super::{FrameSequence, ItemId};

/// FIFO-bounded store of loaded frame sequences.
#[derive(Debug)]
pub struct FrameCache {
    /// Cached entries (id -> frames)
    entries: HashMap<ItemId, FrameSequence>,
    /// Insertion order (front = oldest, back = newest)
    order: VecDeque<ItemId>,
    /// Maximum number of entries
    capacity: usize,
}

impl FrameCache {
    /// Create an empty cache holding at most `capacity` sequences.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Look up a sequence without touching the eviction order.
    pub fn lookup(&self, id: &ItemId) -> Option<&FrameSequence> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.contains_key(id)
    }

    /// Store a sequence as the newest entry and evict the oldest entries
    /// until the cache is back within capacity.
    ///
    /// Storing an id that is already cached replaces its frames but keeps
    /// its original position. Returns the evicted ids, oldest first.
    pub fn store(&mut self, id: ItemId, sequence: FrameSequence) -> Vec<ItemId> {
        if let Some(existing) = self.entries.get_mut(&id) {
            *existing = sequence;
            return Vec::new();
        }

        self.entries.insert(id.clone(), sequence);
        self.order.push_back(id);

        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            debug!(item = %oldest, capacity = self.capacity, "evicted preview frames");
            evicted.push(oldest);
        }
        evicted
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached ids from oldest to newest
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.order.iter()
    }

    /// Encoded size of every cached frame
    pub fn total_bytes(&self) -> u64 {
        self.entries.values().map(FrameSequence::total_bytes).sum()
    }
}
