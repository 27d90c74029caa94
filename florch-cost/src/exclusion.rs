//! Client exclusion set for energy accounting
//!
//! Exclusions are matched on the normalized `n<integer>` index digits, so
//! `"N3"`, `" n3 "` and `"n003"` all exclude the client `n3`. Indices of any
//! width are accepted.
//!
//! Malformed identities never match. A malformed exclusion entry is dropped,
//! and a client whose own identity is malformed is never excluded: it is
//! charged its full training workload.

use std::collections::HashSet;

use florch_common::normalize_client_index;
use tracing::debug;

/// Set of client identities excluded from energy accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientExclusions {
    indices: HashSet<String>,
}

impl ClientExclusions {
    /// Creates an empty exclusion set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an exclusion set from parsed client indices
    pub fn from_indices(indices: impl IntoIterator<Item = u64>) -> Self {
        Self {
            indices: indices.into_iter().map(|index| index.to_string()).collect(),
        }
    }

    /// Adds a client identity.
    ///
    /// Returns `false` and leaves the set unchanged if `id` is malformed.
    pub fn insert(&mut self, id: &str) -> bool {
        match normalize_client_index(id) {
            Ok(index) => {
                self.indices.insert(index);
                true
            }
            Err(e) => {
                debug!("Ignoring exclusion entry: {}", e);
                false
            }
        }
    }

    /// Returns true if the client identity `id` is excluded
    pub fn contains_client(&self, id: &str) -> bool {
        normalize_client_index(id)
            .map(|index| self.indices.contains(&index))
            .unwrap_or(false)
    }

    /// Returns true if the client index is excluded
    pub fn contains_index(&self, index: u64) -> bool {
        self.indices.contains(&index.to_string())
    }

    /// Number of excluded indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClientExclusions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut exclusions = Self::new();
        for id in iter {
            exclusions.insert(id.as_ref());
        }
        exclusions
    }
}
