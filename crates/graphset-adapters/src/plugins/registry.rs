//! The algorithm registry.

use std::sync::{Arc, OnceLock};

use graphset_common::utils::error::{Error, Result};
use indexmap::IndexMap;

use super::algorithms::{LargestComponent, SplitComponents, VertexLabelFilter};
use super::parameters::ParameterDef;
use super::traits::{CollectionAlgorithm, GraphAlgorithm};

/// A registered algorithm of either kind.
#[derive(Clone)]
pub enum RegisteredAlgorithm {
    /// Maps a graph to a graph.
    Graph(Arc<dyn GraphAlgorithm>),
    /// Maps a collection to a collection.
    Collection(Arc<dyn CollectionAlgorithm>),
}

impl RegisteredAlgorithm {
    /// Returns the algorithm name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Graph(a) => a.name(),
            Self::Collection(a) => a.name(),
        }
    }

    /// Returns the algorithm description.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Graph(a) => a.description(),
            Self::Collection(a) => a.description(),
        }
    }

    /// Returns the declared parameters.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDef] {
        match self {
            Self::Graph(a) => a.parameters(),
            Self::Collection(a) => a.parameters(),
        }
    }

    /// Returns `"graph"` or `"collection"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Graph(_) => "graph",
            Self::Collection(_) => "collection",
        }
    }
}

impl std::fmt::Debug for RegisteredAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredAlgorithm")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

/// Maps algorithm names to implementations.
///
/// A registry is filled at startup and then shared behind an `Arc`; once
/// shared it can no longer change.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: IndexMap<String, RegisteredAlgorithm>,
}

static GLOBAL: OnceLock<Arc<AlgorithmRegistry>> = OnceLock::new();

impl AlgorithmRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in algorithms.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for algorithm in builtin_algorithms() {
            let registered = registry.insert(algorithm);
            debug_assert!(registered.is_ok(), "built-in algorithm clash: {registered:?}");
        }
        registry
    }

    /// Returns the process-wide registry.
    ///
    /// Holds the built-ins unless [`install_global`](Self::install_global)
    /// ran first.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::with_builtins())))
    }

    /// Sets the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the global registry is already
    /// in use.
    pub fn install_global(registry: Self) -> Result<()> {
        GLOBAL
            .set(Arc::new(registry))
            .map_err(|_| Error::invalid_argument("the global algorithm registry is already set"))
    }

    /// Registers a graph algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is taken.
    pub fn register_graph(&mut self, algorithm: Arc<dyn GraphAlgorithm>) -> Result<()> {
        self.insert(RegisteredAlgorithm::Graph(algorithm))
    }

    /// Registers a collection algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is taken.
    pub fn register_collection(&mut self, algorithm: Arc<dyn CollectionAlgorithm>) -> Result<()> {
        self.insert(RegisteredAlgorithm::Collection(algorithm))
    }

    fn insert(&mut self, algorithm: RegisteredAlgorithm) -> Result<()> {
        let name = algorithm.name().to_string();
        if self.algorithms.contains_key(&name) {
            return Err(Error::invalid_argument(format!(
                "algorithm '{name}' is already registered"
            )));
        }
        tracing::debug!(algorithm = %name, kind = algorithm.kind(), "registered algorithm");
        self.algorithms.insert(name, algorithm);
        Ok(())
    }

    /// Looks up an algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAlgorithm`] if nothing is registered under
    /// `name`.
    pub fn get(&self, name: &str) -> Result<&RegisteredAlgorithm> {
        self.algorithms
            .get(name)
            .ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))
    }

    /// Returns true if an algorithm is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Iterates algorithms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAlgorithm> {
        self.algorithms.values()
    }

    /// Returns the number of algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Returns true if no algorithm is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

fn builtin_algorithms() -> [RegisteredAlgorithm; 3] {
    [
        RegisteredAlgorithm::Graph(Arc::new(LargestComponent)),
        RegisteredAlgorithm::Graph(Arc::new(VertexLabelFilter::new())),
        RegisteredAlgorithm::Collection(Arc::new(SplitComponents)),
    ]
}
