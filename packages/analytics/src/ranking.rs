//! Insertion-ordered frequency tally.
//!
//! Ties in a ranking are broken by the order in which each value was first
//! seen, never by the value itself. The tally keeps its entries in
//! first-seen order and ranks them with a stable sort.

use std::collections::BTreeMap;

use ufo_map_analytics_models::RankedCount;

/// Occurrence counts of values, in first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTally<K> {
    entries: Vec<RankedCount<K>>,
    positions: BTreeMap<K, usize>,
}

impl<K> Default for FrequencyTally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> FrequencyTally<K> {
    /// Counts one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        if let Some(&position) = self.positions.get(&key) {
            self.entries[position].count += 1;
        } else {
            self.positions.insert(key.clone(), self.entries.len());
            self.entries.push(RankedCount {
                label: key,
                count: 1,
            });
        }
    }

    /// Number of distinct values seen.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent values, most frequent first. Equal counts
    /// keep first-seen order.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<RankedCount<K>> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    /// The single most frequent value.
    #[must_use]
    pub fn most_common(&self) -> Option<&K> {
        // `max_by_key` returns the last maximum; scan manually to keep the
        // first one.
        let mut best: Option<&RankedCount<K>> = None;
        for entry in &self.entries {
            if best.is_none_or(|current| entry.count > current.count) {
                best = Some(entry);
            }
        }
        best.map(|entry| &entry.label)
    }
}

impl<K: Ord + Clone> FromIterator<K> for FrequencyTally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::default();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}
