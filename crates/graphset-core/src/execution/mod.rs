//! Data-parallel execution primitives.
//!
//! The collection algebra is written against a small set of bulk
//! operations: map every item, filter, aggregate by key, and co-group two
//! inputs by key. [`Executor`] runs them on a rayon pool or sequentially.
//! Results never depend on the degree of parallelism.

mod executor;

pub use executor::Executor;
