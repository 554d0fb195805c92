//! Access History Module
//!
//! Per-key rolling windows of recent access timestamps.

use std::collections::{HashMap, VecDeque};

/// Number of timestamps retained per key.
pub const HISTORY_CAPACITY: usize = 10;

// == Access History ==
/// Tracks recent access times for every key.
///
/// Each window holds at most [`HISTORY_CAPACITY`] timestamps, oldest at the
/// front. The history is a statistical signal only; presence in it says
/// nothing about presence in the store.
#[derive(Debug, Default)]
pub struct AccessHistory {
    windows: HashMap<String, VecDeque<u64>>,
}

impl AccessHistory {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Appends `now` to the key's window, dropping the oldest when full.
    pub fn record(&mut self, key: &str, now: u64) {
        let window = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| VecDeque::with_capacity(HISTORY_CAPACITY));

        if window.len() == HISTORY_CAPACITY {
            window.pop_front();
        }
        window.push_back(now);
    }

    // == Get ==
    pub fn get(&self, key: &str) -> Option<&VecDeque<u64>> {
        self.windows.get(key)
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.windows.remove(key);
    }

    pub fn clear(&mut self) {
        self.windows.clear();
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.windows.contains_key(key)
    }
}
