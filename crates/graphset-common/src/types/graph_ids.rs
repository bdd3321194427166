//! Membership sets.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::GraphId;

/// The set of graphs an entity belongs to.
///
/// Stored as a sorted, duplicate-free small vector: most entities belong to
/// only a handful of graphs, and a sorted layout gives cheap merges and a
/// deterministic iteration order.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<GraphId>", into = "Vec<GraphId>")]
pub struct GraphIdSet {
    ids: SmallVec<[GraphId; 4]>,
}

impl GraphIdSet {
    /// Creates an empty membership set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing exactly one graph.
    #[must_use]
    pub fn single(id: GraphId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(id);
        Self { ids }
    }

    /// Adds a graph. Returns true if it was not present before.
    pub fn insert(&mut self, id: GraphId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, id);
                true
            }
        }
    }

    /// Removes a graph. Returns true if it was present.
    pub fn remove(&mut self, id: GraphId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(pos) => {
                self.ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns true if the set contains the graph.
    #[must_use]
    pub fn contains(&self, id: GraphId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Returns the number of graphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the entity belongs to no graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates graph identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = GraphId> + '_ {
        self.ids.iter().copied()
    }

    /// Returns the smallest graph identifier, if any.
    #[must_use]
    pub fn first(&self) -> Option<GraphId> {
        self.ids.first().copied()
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut ids = SmallVec::with_capacity(self.len() + other.len());
        let (mut a, mut b) = (self.ids.iter().peekable(), other.ids.iter().peekable());
        loop {
            match (a.peek(), b.peek()) {
                (Some(&&x), Some(&&y)) => {
                    if x < y {
                        ids.push(x);
                        a.next();
                    } else if y < x {
                        ids.push(y);
                        b.next();
                    } else {
                        ids.push(x);
                        a.next();
                        b.next();
                    }
                }
                (Some(&&x), None) => {
                    ids.push(x);
                    a.next();
                }
                (None, Some(&&y)) => {
                    ids.push(y);
                    b.next();
                }
                (None, None) => break,
            }
        }
        Self { ids }
    }

    /// Keeps only the graphs for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(GraphId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    /// Returns a copy restricted to the graphs accepted by `keep`.
    #[must_use]
    pub fn filtered(&self, keep: impl FnMut(GraphId) -> bool) -> Self {
        let mut out = self.clone();
        out.retain(keep);
        out
    }

    /// Returns true if both sets share at least one graph.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.ids.len() && j < other.ids.len() {
            match self.ids[i].cmp(&other.ids[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    /// Returns true if every graph of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|id| other.contains(id))
    }
}

impl FromIterator<GraphId> for GraphIdSet {
    fn from_iter<I: IntoIterator<Item = GraphId>>(iter: I) -> Self {
        let mut ids: SmallVec<[GraphId; 4]> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}

impl From<Vec<GraphId>> for GraphIdSet {
    fn from(ids: Vec<GraphId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<GraphIdSet> for Vec<GraphId> {
    fn from(set: GraphIdSet) -> Self {
        set.ids.into_vec()
    }
}

impl<const N: usize> From<[GraphId; N]> for GraphIdSet {
    fn from(ids: [GraphId; N]) -> Self {
        ids.into_iter().collect()
    }
}

impl fmt::Debug for GraphIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ids.iter()).finish()
    }
}
