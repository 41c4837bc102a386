//! Insertion-ordered frequency counts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Counts per key, remembering the order keys were first seen.
///
/// [`Histogram::sorted_desc`] orders by descending count; ties keep their
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram(IndexMap<String, usize>);

impl Histogram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`
    pub fn record(&mut self, key: impl Into<String>) {
        *self.0.entry(key.into()).or_insert(0) += 1;
    }

    /// Count for `key`, 0 when never recorded
    #[must_use]
    pub fn get(&self, key: &str) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in the current order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Reorder by descending count, stable for ties
    #[must_use]
    pub fn sorted_desc(mut self) -> Self {
        self.0.sort_by(|_, a, _, b| b.cmp(a));
        self
    }
}

impl<K: Into<String>> FromIterator<K> for Histogram {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for key in iter {
            histogram.record(key);
        }
        histogram
    }
}
