//! Canonical labeling.
//!
//! A canonical label is a string computed from a logical graph's structure,
//! labels and properties, but not from its identifiers. Two graphs get the
//! same label exactly when they are isomorphic under a mapping that
//! preserves labels and properties. The algebra uses labels to deduplicate
//! collections.
//!
//! - [`CanonicalLabeler`] - The pluggable labeling contract
//! - [`RefinementLabeler`] - Color refinement with individualization

mod encode;
mod refinement;

pub use refinement::RefinementLabeler;

use crate::graph::model::LogicalGraph;

/// Computes canonical labels for logical graphs.
///
/// Implementations must be deterministic, must not depend on the order in
/// which vertices and edges are stored, and must map two graphs to the same
/// string if and only if they are label-isomorphic.
pub trait CanonicalLabeler: Send + Sync {
    /// Returns the labeler name.
    fn name(&self) -> &str;

    /// Returns the canonical label of a graph.
    fn label(&self, graph: &LogicalGraph) -> String;
}
