use log::debug;
use rayon::prelude::*;

/// Forbidden keys of a round, sorted ascending. Duplicates are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortedKeys {
    keys: Vec<u64>,
    arity: usize,
}

impl SortedKeys {
    /// Sort the keys of a batch of the given arity.
    ///
    /// The parallel sort only returns once every subtask has joined, so the
    /// result is fully ordered when this returns.
    pub fn sort(mut keys: Vec<u64>, arity: usize, parallel: bool) -> Self {
        if parallel {
            keys.par_sort_unstable();
        } else {
            keys.sort_unstable();
        }
        debug_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        debug!("sorted {} keys over a domain of {} bits", keys.len(), arity);
        SortedKeys { keys, arity }
    }

    /// Sorted keys.
    pub fn as_slice(&self) -> &[u64] {
        &self.keys
    }

    /// Arity `C`, the width of every key.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Largest value of the domain, `2^C - 1`.
    pub fn domain_max(&self) -> u64 {
        if self.arity == 0 {
            0
        } else {
            u64::MAX >> (64 - self.arity)
        }
    }

    /// Number of keys, duplicates included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct domain points covered by the keys.
    pub fn n_distinct(&self) -> usize {
        if self.keys.is_empty() {
            return 0;
        }
        1 + self.keys.windows(2).filter(|w| w[0] != w[1]).count()
    }
}
