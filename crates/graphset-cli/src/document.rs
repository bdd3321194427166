//! The JSON collection document.
//!
//! ```json
//! {
//!   "heads":    [{"id": 0, "label": "Community", "properties": {"area": "Leipzig"}}],
//!   "vertices": [{"id": 0, "label": "Person", "properties": {}, "graphs": [0]}],
//!   "edges":    [{"id": 0, "source": 0, "target": 1, "label": "knows", "graphs": [0]}]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use graphset_core::graph::model::{Edge, GraphCollection, GraphHead, Vertex};
use serde::{Deserialize, Serialize};

/// A collection as stored on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub heads: Vec<GraphHead>,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Document {
    /// Reads a document from a file.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("{} is not a collection document", path.display()))
    }

    /// Captures a collection. Heads keep collection order.
    pub fn from_collection(collection: &GraphCollection) -> Self {
        Self {
            heads: collection.heads().map(|h| (**h).clone()).collect(),
            vertices: collection.vertices().map(|v| (**v).clone()).collect(),
            edges: collection.edges().map(|e| (**e).clone()).collect(),
        }
    }

    /// Builds the collection. Membership is checked, edge endpoints are
    /// not; use [`GraphCollection::validate`] for that.
    pub fn into_collection(self) -> Result<GraphCollection> {
        Ok(GraphCollection::new(self.heads, self.vertices, self.edges)?)
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to a file.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("cannot write {}", path.display()))
    }
}

/// Reads a collection from a document file.
pub fn load(path: &Path) -> Result<GraphCollection> {
    let collection = Document::read(path)?.into_collection()?;
    tracing::debug!(
        path = %path.display(),
        graphs = collection.len(),
        vertices = collection.vertex_count(),
        edges = collection.edge_count(),
        "loaded collection"
    );
    Ok(collection)
}
