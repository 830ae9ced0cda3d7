use std::collections::VecDeque;

/// Bounded record of past states, newest first.
///
/// Once full, pushing drops the oldest entry.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    pub const DEFAULT_CAPACITY: usize = 200;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entry `index` steps back in time; 0 is the newest
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clamp a scrub index into the recorded range
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.entries.len().saturating_sub(1))
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
