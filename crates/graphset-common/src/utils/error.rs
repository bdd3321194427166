//! Error types shared by all Graphset crates.
//!
//! Every failure is local and synchronous: it is returned at the call that
//! detects it. Nothing is retried inside the library.

use thiserror::Error;

use crate::types::{EdgeId, EntityRef, GraphId, VertexId};

/// Result type alias for Graphset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type.
#[derive(Error, Debug)]
pub enum Error {
    /// An identifier lookup missed.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// An identifier is already in use by an entity with different content.
    #[error("duplicate identifier: {0} already exists with different content")]
    DuplicateIdentifier(EntityRef),

    /// Two inputs carry the same identifier with differing content.
    #[error("inconsistent merge: {0} differs between the merged inputs")]
    InconsistentMerge(EntityRef),

    /// A graph identifier has no corresponding graph head.
    #[error("graph head {0} is missing")]
    MissingHead(GraphId),

    /// An entity belongs to a graph whose head is not part of the collection.
    #[error("{element} is a member of graph {graph}, which has no head in the collection")]
    DanglingMembership {
        /// The offending entity.
        element: EntityRef,
        /// The graph without a head.
        graph: GraphId,
    },

    /// An edge references a vertex that does not exist.
    #[error("edge {edge} references missing vertex {vertex}")]
    DanglingEdge {
        /// The offending edge.
        edge: EdgeId,
        /// The missing endpoint.
        vertex: VertexId,
    },

    /// An operation that needs at least one graph got none.
    #[error("{0} requires a non-empty collection")]
    EmptyCollection(&'static str),

    /// An argument is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No algorithm is registered under the requested name.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A dispatched algorithm raised an error.
    #[error("algorithm '{algorithm}' failed: {source}")]
    AlgorithmFailure {
        /// Name of the algorithm.
        algorithm: String,
        /// The error the algorithm raised.
        #[source]
        source: anyhow::Error,
    },

    /// The operation was cancelled before it completed.
    #[error("operation cancelled")]
    Cancelled,

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns true for errors that indicate a broken structural invariant
    /// (a programming error rather than bad input).
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingHead(_) | Self::DanglingMembership { .. } | Self::DanglingEdge { .. }
        )
    }
}
