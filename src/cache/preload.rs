//! Predictive Preload Module
//!
//! Correlates access histories to suggest keys a caller is likely to read
//! next. Hints are advisory: nothing here fetches or mutates data.

use std::collections::VecDeque;

use serde::Serialize;

use crate::cache::{AccessHistory, CacheEntry};

/// Two accesses closer than this are counted as correlated.
pub const CORRELATION_WINDOW_MS: u64 = 5_000;

/// Correlation a candidate must exceed to be predicted.
pub const CORRELATION_THRESHOLD: f64 = 0.7;

/// Maximum predictions per hit.
pub const MAX_PREDICTIONS: usize = 3;

/// Candidates need strictly more reads than this.
pub const MIN_ACCESS_COUNT: u64 = 3;

// == Preload Hint ==
/// Suggestion that `key` be warmed by the data-fetch layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreloadHint {
    pub key: String,
}

// == Correlation ==
/// Fraction of timestamp pairs falling inside [`CORRELATION_WINDOW_MS`].
///
/// Counts every `(a, b)` pair across both windows whose distance is below the
/// window, divided by the longer window's length. The result is not bounded
/// by 1.0 when accesses cluster tightly.
pub fn correlation(first: &VecDeque<u64>, second: &VecDeque<u64>) -> f64 {
    let longest = first.len().max(second.len());
    if longest == 0 {
        return 0.0;
    }

    let pairs = first
        .iter()
        .map(|a| {
            second
                .iter()
                .filter(|b| a.abs_diff(**b) < CORRELATION_WINDOW_MS)
                .count()
        })
        .sum::<usize>();

    pairs as f64 / longest as f64
}

// == Predict ==
/// Returns up to [`MAX_PREDICTIONS`] keys correlated with `key`, strongest first.
pub fn predict<'a, I>(key: &str, history: &AccessHistory, entries: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a String, &'a CacheEntry)>,
{
    let Some(accessed) = history.get(key) else {
        return Vec::new();
    };

    let mut candidates: Vec<(f64, &String)> = entries
        .into_iter()
        .filter(|(other, entry)| other.as_str() != key && entry.access_count > MIN_ACCESS_COUNT)
        .filter_map(|(other, _)| {
            let score = correlation(accessed, history.get(other)?);
            (score > CORRELATION_THRESHOLD).then_some((score, other))
        })
        .collect();

    candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    candidates
        .into_iter()
        .take(MAX_PREDICTIONS)
        .map(|(_, other)| other.clone())
        .collect()
}
