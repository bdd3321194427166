//! Ordering and truncation.

use std::cmp::Ordering;

use graphset_common::types::{GraphId, Value};
use graphset_common::utils::error::{Error, Result};
use graphset_core::graph::model::GraphCollection;
use graphset_core::AggregateFunction;

use crate::config::MissingKeyOrder;
use crate::engine::Engine;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

impl Engine {
    /// Orders the graphs by a head property.
    ///
    /// A graph without the property, or with a null value, takes the
    /// position configured by [`Config::missing_key_order`](crate::Config)
    /// before the direction is applied. Equal keys are ordered by ascending
    /// identifier, so the result is fully determined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is empty.
    pub fn sort_by(
        &self,
        collection: &GraphCollection,
        key: &str,
        order: SortOrder,
    ) -> Result<GraphCollection> {
        if key.is_empty() {
            return Err(Error::invalid_argument("sort key must not be empty"));
        }
        let keyed = collection
            .heads()
            .map(|head| (head.id, head.get_property(key).cloned()))
            .collect();
        let result = self.sort_keyed(collection, keyed, order);
        self.log_operator("sort_by", collection.len(), result.len());
        Ok(result)
    }

    /// Orders the graphs by the value of an aggregate over each graph.
    ///
    /// A null aggregate counts as a missing key.
    ///
    /// # Errors
    ///
    /// Returns [`DanglingEdge`](Error::DanglingEdge) if a graph cannot be
    /// projected.
    pub fn sort_by_aggregate(
        &self,
        collection: &GraphCollection,
        function: &dyn AggregateFunction,
        order: SortOrder,
    ) -> Result<GraphCollection> {
        let graphs = collection.graphs()?;
        let keyed = self
            .executor()
            .map_each(&graphs, |g| (g.id(), Some(function.aggregate(g))));
        let result = self.sort_keyed(collection, keyed, order);
        self.log_operator("sort_by_aggregate", collection.len(), result.len());
        Ok(result)
    }

    /// Keeps the first `n` graphs in collection order.
    ///
    /// `n == 0` yields an empty collection; `n` at or above the length
    /// returns the collection unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `n` is negative.
    pub fn top(&self, collection: &GraphCollection, n: i64) -> Result<GraphCollection> {
        let n = usize::try_from(n)
            .map_err(|_| Error::invalid_argument(format!("top expects n >= 0, got {n}")))?;
        let result = collection.restrict(collection.head_ids().take(n));
        self.log_operator("top", collection.len(), result.len());
        Ok(result)
    }

    /// Sorts by a head property and keeps the first `n` graphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is empty or `n` is
    /// negative.
    pub fn top_by(
        &self,
        collection: &GraphCollection,
        key: &str,
        order: SortOrder,
        n: i64,
    ) -> Result<GraphCollection> {
        if n < 0 {
            return Err(Error::invalid_argument(format!("top expects n >= 0, got {n}")));
        }
        let sorted = self.sort_by(collection, key, order)?;
        self.top(&sorted, n)
    }

    fn sort_keyed(
        &self,
        collection: &GraphCollection,
        mut keyed: Vec<(GraphId, Option<Value>)>,
        order: SortOrder,
    ) -> GraphCollection {
        let missing = self.config().missing_key_order;
        keyed.sort_by(|(a_id, a), (b_id, b)| {
            compare_keys(a.as_ref(), b.as_ref(), missing, order).then(a_id.cmp(b_id))
        });
        collection.restrict(keyed.into_iter().map(|(id, _)| id))
    }
}

fn compare_keys(
    a: Option<&Value>,
    b: Option<&Value>,
    missing: MissingKeyOrder,
    order: SortOrder,
) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let ordering = match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match missing {
            MissingKeyOrder::Min => Ordering::Less,
            MissingKeyOrder::Max => Ordering::Greater,
        },
        (Some(_), None) => match missing {
            MissingKeyOrder::Min => Ordering::Greater,
            MissingKeyOrder::Max => Ordering::Less,
        },
    };
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}
