//! Identifier types.
//!
//! All identifiers are plain `u64` newtypes. They are totally ordered so
//! that operators can break ties reproducibly (smallest identifier wins).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::utils::error::{Error, Result};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from its raw value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a vertex.
    VertexId,
    "v"
);

define_id!(
    /// Identifier of an edge.
    EdgeId,
    "e"
);

define_id!(
    /// Identifier of a logical graph, i.e. of its graph head.
    ///
    /// The same value appears in the membership sets of every vertex and
    /// edge belonging to that graph.
    GraphId,
    "g"
);

impl GraphId {
    /// The absent graph identifier.
    ///
    /// Never stored in a membership set. Used as a placeholder for entities
    /// that have not been assigned to any graph yet.
    pub const NULL: Self = Self(u64::MAX);

    /// Returns true if this is [`GraphId::NULL`].
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

/// A reference to any stored entity, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A vertex.
    Vertex(VertexId),
    /// An edge.
    Edge(EdgeId),
    /// A graph head.
    GraphHead(GraphId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex(id) => write!(f, "vertex {id}"),
            Self::Edge(id) => write!(f, "edge {id}"),
            Self::GraphHead(id) => write!(f, "graph head {id}"),
        }
    }
}

impl From<VertexId> for EntityRef {
    fn from(id: VertexId) -> Self {
        Self::Vertex(id)
    }
}

impl From<EdgeId> for EntityRef {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

impl From<GraphId> for EntityRef {
    fn from(id: GraphId) -> Self {
        Self::GraphHead(id)
    }
}

/// Thread-safe allocator for fresh identifiers.
///
/// Shared by everything that mints new graph heads (the `apply` operator,
/// collection algorithms) so that concurrently produced heads never collide.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator whose first value is `base`.
    #[must_use]
    pub const fn starting_at(base: u64) -> Self {
        Self {
            next: AtomicU64::new(base),
        }
    }

    /// Returns the next raw identifier.
    pub fn next_raw(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the next raw identifier strictly greater than `floor`, or
    /// `None` once the identifier space above `floor` is used up.
    ///
    /// Advances the generator past `floor` first if needed. `u64::MAX` is
    /// never returned.
    pub fn next_raw_after(&self, floor: u64) -> Option<u64> {
        let lowest = floor.checked_add(1)?;
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current.max(lowest).checked_add(1)
            })
            .ok()
            .map(|previous| previous.max(lowest))
    }

    /// Returns a fresh graph identifier greater than `floor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] when no identifier below
    /// [`GraphId::NULL`] is left.
    pub fn next_graph_id(&self, floor: GraphId) -> Result<GraphId> {
        let floor = if floor.is_null() { 0 } else { floor.as_u64() };
        self.next_raw_after(floor)
            .map(GraphId::new)
            .ok_or_else(|| Error::Internal(format!("graph identifiers above {floor} exhausted")))
    }

    /// Returns the value the next call to [`next_raw`](Self::next_raw) would yield.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Acquire)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::starting_at(0)
    }
}
