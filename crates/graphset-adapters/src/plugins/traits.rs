//! Algorithm traits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use graphset_common::types::{GraphId, IdGenerator};
use graphset_common::utils::error::{Error, Result};
use graphset_core::graph::model::{GraphCollection, LogicalGraph};

use super::parameters::{ParameterDef, Parameters};

/// A shared flag that asks a running algorithm to stop.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not fired.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once the token has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns [`Error::Cancelled`] once the token has fired.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// What an algorithm may use besides its input.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmContext<'a> {
    /// Source of fresh graph identifiers.
    pub ids: &'a IdGenerator,
    /// Cancellation flag. Long-running algorithms should poll it.
    pub cancel: &'a CancellationToken,
}

impl<'a> AlgorithmContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(ids: &'a IdGenerator, cancel: &'a CancellationToken) -> Self {
        Self { ids, cancel }
    }

    /// Returns a fresh graph identifier greater than `floor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] once graph identifiers are exhausted.
    pub fn next_graph_id(&self, floor: GraphId) -> Result<GraphId> {
        self.ids.next_graph_id(floor)
    }

    /// Fails with [`Error::Cancelled`] once the token has fired.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn check_cancelled(&self) -> anyhow::Result<()> {
        Ok(self.cancel.check()?)
    }
}

/// An algorithm that maps one logical graph to another.
pub trait GraphAlgorithm: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Declared parameters.
    fn parameters(&self) -> &[ParameterDef] {
        &[]
    }

    /// Runs the algorithm. `params` have been checked against
    /// [`parameters`](Self::parameters).
    ///
    /// # Errors
    ///
    /// Any failure; the caller wraps it.
    fn execute(
        &self,
        graph: &LogicalGraph,
        params: &Parameters,
        ctx: &AlgorithmContext<'_>,
    ) -> anyhow::Result<LogicalGraph>;
}

/// An algorithm that maps one graph collection to another.
pub trait CollectionAlgorithm: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Declared parameters.
    fn parameters(&self) -> &[ParameterDef] {
        &[]
    }

    /// Runs the algorithm. `params` have been checked against
    /// [`parameters`](Self::parameters).
    ///
    /// # Errors
    ///
    /// Any failure; the caller wraps it.
    fn execute(
        &self,
        collection: &GraphCollection,
        params: &Parameters,
        ctx: &AlgorithmContext<'_>,
    ) -> anyhow::Result<GraphCollection>;
}
