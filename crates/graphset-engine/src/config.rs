//! Engine configuration.

use graphset_common::utils::error::{Error, Result};

/// Where graphs without a sort key end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyOrder {
    /// A missing key compares below every value.
    #[default]
    Min,
    /// A missing key compares above every value.
    Max,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker threads: 0 uses the global rayon pool, 1 runs sequentially,
    /// larger values build a dedicated pool.
    pub threads: usize,

    /// Position of graphs that lack the sort key.
    pub missing_key_order: MissingKeyOrder,

    /// Lowest identifier handed out to graphs created by operators.
    pub graph_id_base: u64,

    /// Log every operator at INFO instead of DEBUG.
    pub operator_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: 0,
            missing_key_order: MissingKeyOrder::Min,
            graph_id_base: 1 << 32,
            operator_logging: false,
        }
    }
}

impl Config {
    /// Configuration that runs every operator on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self::default().with_threads(1)
    }

    /// Sets the number of worker threads.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets where graphs without a sort key end up.
    #[must_use]
    pub fn with_missing_key_order(mut self, order: MissingKeyOrder) -> Self {
        self.missing_key_order = order;
        self
    }

    /// Sets the lowest identifier for operator-created graphs.
    #[must_use]
    pub fn with_graph_id_base(mut self, base: u64) -> Self {
        self.graph_id_base = base;
        self
    }

    /// Enables operator logging at INFO.
    #[must_use]
    pub fn with_operator_logging(mut self, enabled: bool) -> Self {
        self.operator_logging = enabled;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `graph_id_base` is the null
    /// graph identifier.
    pub fn validate(&self) -> Result<()> {
        if self.graph_id_base == u64::MAX {
            return Err(Error::invalid_argument(
                "graph_id_base must be below the null graph id",
            ));
        }
        Ok(())
    }
}
