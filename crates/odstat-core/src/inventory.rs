//! Inventory counter: tallies distinct OS, device or version values.
//!
//! Inventory runs bypass the filter entirely. One count is added per
//! submission, whether or not any of its scene results succeeded.

use crate::types::{Dimension, Submission};
use std::collections::HashMap;

/// Occurrence count of every distinct value seen along one [`Dimension`].
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryCounts {
    dimension: Dimension,
    counts: HashMap<String, usize>,
    examined: usize,
}

impl InventoryCounts {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            counts: HashMap::new(),
            examined: 0,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Count one occurrence of `value`.
    pub fn increment(&mut self, value: &str) {
        self.examined += 1;
        match self.counts.get_mut(value) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    /// Count a submission along this inventory's dimension.
    pub fn record(&mut self, submission: &Submission) {
        self.increment(submission.value(self.dimension));
    }

    /// Occurrences of one value; zero if never seen.
    pub fn get(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of distinct values.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of submissions counted.
    pub fn examined(&self) -> usize {
        self.examined
    }

    /// `(value, count)` pairs ordered by value.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut pairs: Vec<_> = self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

/// Tally `submissions` along `dimension`.
pub fn count_distinct<'a, I>(submissions: I, dimension: Dimension) -> InventoryCounts
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut counts = InventoryCounts::new(dimension);
    for submission in submissions {
        counts.record(submission);
    }
    counts
}
