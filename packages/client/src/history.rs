//! Bounded undo history.

use std::collections::VecDeque;

use sketchroom_server::domain::Snapshot;

/// Maximum number of undo entries a session keeps
pub const UNDO_HISTORY_LIMIT: usize = 20;

/// Undo stack of raster snapshots. When full, pushing evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::with_capacity(UNDO_HISTORY_LIMIT)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Most recent entry
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
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
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}
