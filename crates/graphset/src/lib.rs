//! # Graphset
//!
//! Property graph collections: many logical graphs over one shared pool of
//! vertices and edges, and an algebra to combine them.
//!
//! Start with [`Engine`]. Every operator takes collections by reference and
//! returns a new one; inputs are never modified.
//!
//! | Operator | Result |
//! | -------- | ------ |
//! | `union`, `intersect`, `difference` | Set operations by graph identifier |
//! | `select` | Graphs satisfying a predicate |
//! | `distinct` | One graph per isomorphism class |
//! | `sort_by`, `top`, `top_by` | Ordered and truncated collections |
//! | `apply`, `reduce` | Per-graph transformation and folding |
//! | `aggregate` | Aggregates written to graph heads |
//! | `call_for_graph`, `call_for_collection` | Registered algorithms |
//!
//! ## Quick Start
//!
//! ```rust
//! use graphset::{Engine, FixtureBuilder};
//!
//! let mut fixture = FixtureBuilder::new();
//! fixture
//!     .graph("g1", "Community")?
//!     .graph("g2", "Community")?
//!     .vertex("alice", "Person", &["g1", "g2"])?
//!     .vertex("bob", "Person", &["g1"])?
//!     .vertex("carol", "Person", &["g2"])?
//!     .edge("ab", "alice", "bob", "knows", &["g1"])?
//!     .edge("ac", "alice", "carol", "knows", &["g2"])?;
//!
//! let engine = Engine::new();
//! let g1 = fixture.collection_by_variables(&["g1"])?;
//! let g2 = fixture.collection_by_variables(&["g2"])?;
//!
//! let both = engine.union(&g1, &g2)?;
//! assert_eq!(both.vertex_count(), 3);
//!
//! // g1 and g2 have the same shape.
//! assert_eq!(engine.distinct(&both)?.len(), 1);
//! # Ok::<(), graphset::Error>(())
//! ```

// Re-export the engine API
pub use graphset_engine::{
    Config, Engine, GraphTransform, MissingKeyOrder, PreserveIdentity, SortOrder,
};

// Re-export the data model
pub use graphset_core::aggregation::{
    AggregateFunction, CountProperty, EdgeCount, ElementScope, MaxProperty, MinProperty,
    SumProperty, VertexCount,
};
pub use graphset_core::canonical::{CanonicalLabeler, RefinementLabeler};
pub use graphset_core::graph::model::{
    Edge, ElementRef, EntityStore, GraphCollection, GraphHead, LogicalGraph, Vertex,
};

// Re-export plugins and fixtures
pub use graphset_adapters::fixture::FixtureBuilder;
pub use graphset_adapters::plugins::{
    AlgorithmRegistry, CancellationToken, CollectionAlgorithm, GraphAlgorithm, Parameters,
};

// Re-export core types - you'll need these for working with IDs and values
pub use graphset_common::types::{EdgeId, GraphId, GraphIdSet, Value, VertexId};
pub use graphset_common::utils::error::{Error, Result};
