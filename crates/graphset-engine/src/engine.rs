//! The engine.

use std::sync::Arc;

use graphset_adapters::plugins::AlgorithmRegistry;
use graphset_common::types::IdGenerator;
use graphset_common::utils::error::Result;
use graphset_core::{CanonicalLabeler, Executor, RefinementLabeler};

use crate::config::Config;

/// Runs the collection algebra.
///
/// The engine holds no collection state: every operator takes immutable
/// collections and returns a new one. What it does hold is shared
/// machinery: the executor, the canonical labeler used by `distinct`, the
/// algorithm registry used by the `call_for_*` operators, and the
/// generator for fresh graph identifiers.
///
/// The identifier generator is the only part that changes between calls.
/// Identifiers minted by `apply` and by collection algorithms are never
/// reused, so results of separate calls can be combined without clashes;
/// repeating a call gives the same graphs under new identifiers.
///
/// # Examples
///
/// ```ignore
/// use graphset_engine::Engine;
///
/// let engine = Engine::new();
/// let merged = engine.union(&a, &b)?;
/// let unique = engine.distinct(&merged)?;
/// ```
pub struct Engine {
    config: Config,
    executor: Executor,
    labeler: Arc<dyn CanonicalLabeler>,
    registry: Arc<AlgorithmRegistry>,
    ids: Arc<IdGenerator>,
}

impl Engine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            executor: Executor::default(),
            labeler: Arc::new(RefinementLabeler::new()),
            registry: AlgorithmRegistry::global(),
            ids: Arc::new(IdGenerator::starting_at(config.graph_id_base)),
            config,
        }
    }

    /// Creates an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the thread pool
    /// cannot be built.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use graphset_engine::{Config, Engine};
    ///
    /// let engine = Engine::with_config(Config::default().with_threads(4))?;
    /// ```
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let executor = Executor::new(config.threads)?;
        tracing::debug!(threads = executor.threads(), "created engine");
        Ok(Self {
            executor,
            labeler: Arc::new(RefinementLabeler::new()),
            registry: AlgorithmRegistry::global(),
            ids: Arc::new(IdGenerator::starting_at(config.graph_id_base)),
            config,
        })
    }

    /// Replaces the canonical labeler.
    #[must_use]
    pub fn with_labeler(mut self, labeler: Arc<dyn CanonicalLabeler>) -> Self {
        self.labeler = labeler;
        self
    }

    /// Replaces the algorithm registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<AlgorithmRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the executor.
    #[must_use]
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Returns the canonical labeler.
    #[must_use]
    pub fn labeler(&self) -> &dyn CanonicalLabeler {
        self.labeler.as_ref()
    }

    /// Returns the algorithm registry.
    #[must_use]
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Returns the generator for fresh graph identifiers.
    #[must_use]
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub(crate) fn log_operator(&self, operator: &'static str, input: usize, output: usize) {
        if self.config.operator_logging {
            tracing::info!(operator, input, output, "operator finished");
        } else {
            tracing::debug!(operator, input, output, "operator finished");
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("threads", &self.executor.threads())
            .field("labeler", &self.labeler.name())
            .field("algorithms", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingKeyOrder;

    #[test]
    fn test_new_uses_builtins() {
        let engine = Engine::new();
        assert!(engine.registry().contains("largest_component"));
        assert_eq!(engine.labeler().name(), "refinement");
        assert_eq!(engine.ids().peek(), 1 << 32);
    }

    #[test]
    fn test_with_config() {
        let engine = Engine::with_config(
            Config::sequential()
                .with_graph_id_base(1000)
                .with_missing_key_order(MissingKeyOrder::Max),
        )
        .unwrap();
        assert_eq!(engine.executor().threads(), 1);
        assert_eq!(engine.ids().peek(), 1000);
        assert_eq!(engine.config().missing_key_order, MissingKeyOrder::Max);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        assert!(Engine::with_config(Config::default().with_graph_id_base(u64::MAX)).is_err());
    }

    #[test]
    fn test_with_registry() {
        let engine = Engine::new().with_registry(Arc::new(AlgorithmRegistry::new()));
        assert!(engine.registry().is_empty());
    }
}
