//! Shuffle history tracking
//!
//! Records the indices visited while shuffle is enabled. This is both the
//! exclusion set for the next random pick and the only meaningful notion of
//! "previous" in shuffle mode.

/// Visited indices since shuffle was enabled (most recent = back)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShuffleHistory {
    indices: Vec<usize>,
}

impl ShuffleHistory {
    /// Create empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart history from the given current index
    ///
    /// With no current track the history is simply emptied.
    pub fn seed(&mut self, current: Option<usize>) {
        self.indices.clear();
        if let Some(index) = current {
            self.indices.push(index);
        }
    }

    /// Record a visited index as the most recent entry
    ///
    /// An index already present moves to the back instead of being recorded
    /// twice.
    pub fn record(&mut self, index: usize) {
        self.indices.retain(|&i| i != index);
        self.indices.push(index);
    }

    /// Step back one entry
    ///
    /// Drops the most recent index and returns the one before it. Needs at
    /// least two entries; otherwise history is left untouched.
    pub fn step_back(&mut self) -> Option<usize> {
        if self.indices.len() < 2 {
            return None;
        }
        self.indices.pop();
        self.indices.last().copied()
    }

    /// Most recent index
    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Check whether an index has been visited
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Drop indices that no longer address a collection of `len` tracks
    ///
    /// Returns the number of entries removed.
    pub fn retain_below(&mut self, len: usize) -> usize {
        let before = self.indices.len();
        self.indices.retain(|&i| i < len);
        before - self.indices.len()
    }

    /// Visited indices (oldest first)
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }
}
