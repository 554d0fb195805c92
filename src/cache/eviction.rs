//! Eviction Policy Module
//!
//! Scores entries by priority, access frequency, recency, and size, and picks
//! the lowest-scoring quarter of the store for removal.

use crate::cache::CacheEntry;

/// Fraction of the store removed by one eviction pass.
pub const EVICTION_FRACTION: f64 = 0.25;

const MS_PER_MINUTE: f64 = 60_000.0;
const FREQUENCY_CAP: f64 = 50.0;
const RECENCY_MAX: f64 = 50.0;
const RECENCY_DIVISOR: f64 = 5.0;
const SIZE_MAX: f64 = 25.0;

// == Score ==
/// Retention score of `entry` at `now`; lower scores are evicted first.
///
/// - priority: high 100, medium 50, low 25
/// - frequency: `min(accesses_per_minute * 10, 50)`
/// - recency: `max(0, 50 - idle_minutes / 5)`
/// - size: `max(0, 25 - size_kb)`
pub fn score_entry(entry: &CacheEntry, now: u64) -> f64 {
    // Clamp to 1ms so a brand-new entry has a finite frequency
    let age_minutes = now.saturating_sub(entry.timestamp).max(1) as f64 / MS_PER_MINUTE;
    let idle_minutes = now.saturating_sub(entry.last_accessed) as f64 / MS_PER_MINUTE;
    let access_frequency = entry.access_count as f64 / age_minutes;
    let size_kb = entry.size as f64 / 1024.0;

    let priority_score = entry.priority.weight();
    let frequency_score = (access_frequency * 10.0).min(FREQUENCY_CAP);
    let recency_score = (RECENCY_MAX - idle_minutes / RECENCY_DIVISOR).max(0.0);
    let size_score = (SIZE_MAX - size_kb).max(0.0);

    priority_score + frequency_score + recency_score + size_score
}

// == Eviction Count ==
/// Number of entries one pass removes from a store of `len` entries.
pub fn eviction_count(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    ((len as f64 * EVICTION_FRACTION).ceil() as usize).clamp(1, len)
}

// == Select Victims ==
/// Returns the keys of the lowest-scoring entries, lowest first.
///
/// Ties fall back to the older entry, then to key order.
pub fn select_victims<'a, I>(entries: I, now: u64) -> Vec<String>
where
    I: IntoIterator<Item = (&'a String, &'a CacheEntry)>,
{
    let mut scored: Vec<(f64, u64, &String)> = entries
        .into_iter()
        .map(|(key, entry)| (score_entry(entry, now), entry.timestamp, key))
        .collect();

    scored.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(b.2))
    });

    let count = eviction_count(scored.len());
    scored
        .into_iter()
        .take(count)
        .map(|(_, _, key)| key.clone())
        .collect()
}
