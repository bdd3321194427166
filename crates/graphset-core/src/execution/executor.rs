//! The executor.

use std::collections::BTreeMap;
use std::sync::Arc;

use graphset_common::utils::error::{Error, Result};
use rayon::prelude::*;

/// Inputs shorter than this run on the calling thread.
const MIN_PARALLEL_ITEMS: usize = 2;

#[derive(Debug, Clone)]
enum Mode {
    Sequential,
    Global,
    Pool(Arc<rayon::ThreadPool>),
}

/// Runs bulk operations over slices.
///
/// Output order always follows input order, so parallel and sequential
/// runs produce identical results.
#[derive(Debug, Clone)]
pub struct Executor {
    mode: Mode,
}

impl Executor {
    /// Creates an executor.
    ///
    /// `threads == 0` uses the global rayon pool, `threads == 1` runs
    /// everything on the calling thread, and larger values build a dedicated
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the thread pool cannot be built.
    pub fn new(threads: usize) -> Result<Self> {
        let mode = match threads {
            0 => Mode::Global,
            1 => Mode::Sequential,
            n => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("graphset-worker-{i}"))
                    .build()
                    .map_err(|e| Error::Internal(format!("thread pool: {e}")))?;
                tracing::debug!(threads = n, "built executor thread pool");
                Mode::Pool(Arc::new(pool))
            }
        };
        Ok(Self { mode })
    }

    /// Creates an executor that runs on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: Mode::Sequential,
        }
    }

    /// Returns the number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        match &self.mode {
            Mode::Sequential => 1,
            Mode::Global => rayon::current_num_threads(),
            Mode::Pool(pool) => pool.current_num_threads(),
        }
    }

    fn parallel(&self, len: usize) -> bool {
        !matches!(self.mode, Mode::Sequential) && len >= MIN_PARALLEL_ITEMS
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.mode {
            Mode::Pool(pool) => pool.install(op),
            Mode::Sequential | Mode::Global => op(),
        }
    }

    /// Applies `f` to every item.
    pub fn map_each<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        if self.parallel(items.len()) {
            self.install(|| items.par_iter().map(&f).collect())
        } else {
            items.iter().map(f).collect()
        }
    }

    /// Applies a fallible `f` to every item.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing item in input order.
    pub fn try_map_each<T, U, F>(&self, items: &[T], f: F) -> Result<Vec<U>>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> Result<U> + Sync + Send,
    {
        if self.parallel(items.len()) {
            let results: Vec<Result<U>> = self.install(|| items.par_iter().map(&f).collect());
            results.into_iter().collect()
        } else {
            items.iter().map(f).collect()
        }
    }

    /// Keeps the items accepted by `keep`.
    pub fn filter_each<'a, T, F>(&self, items: &'a [T], keep: F) -> Vec<&'a T>
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        if self.parallel(items.len()) {
            self.install(|| items.par_iter().filter(|&item| keep(item)).collect())
        } else {
            items.iter().filter(|&item| keep(item)).collect()
        }
    }

    /// Groups items by key and folds each group's values with `combine`.
    ///
    /// Each worker folds its share of the input into partial groups that
    /// are then merged, so `combine` must be associative and commutative
    /// with `identity` as neutral element.
    pub fn group_by_and_aggregate<T, K, V, KF, VF, IF, CF>(
        &self,
        items: &[T],
        key: KF,
        value: VF,
        identity: IF,
        combine: CF,
    ) -> BTreeMap<K, V>
    where
        T: Sync,
        K: Ord + Send,
        V: Send,
        KF: Fn(&T) -> K + Sync + Send,
        VF: Fn(&T) -> V + Sync + Send,
        IF: Fn() -> V + Sync + Send,
        CF: Fn(V, V) -> V + Sync + Send,
    {
        let fold = |mut groups: BTreeMap<K, V>, item: &T| {
            let k = key(item);
            let acc = groups.remove(&k).unwrap_or_else(&identity);
            groups.insert(k, combine(acc, value(item)));
            groups
        };
        let merge = |mut left: BTreeMap<K, V>, right: BTreeMap<K, V>| {
            for (k, v) in right {
                let merged = match left.remove(&k) {
                    Some(acc) => combine(acc, v),
                    None => v,
                };
                left.insert(k, merged);
            }
            left
        };

        if self.parallel(items.len()) {
            self.install(|| {
                items
                    .par_iter()
                    .fold(BTreeMap::new, fold)
                    .reduce(BTreeMap::new, merge)
            })
        } else {
            items.iter().fold(BTreeMap::new(), fold)
        }
    }

    /// Pairs up the items of two inputs that share a key.
    ///
    /// Returns one entry per key present on either side, in ascending key
    /// order. Within a group, items keep their input order.
    pub fn co_group_by_key<'a, L, R, K, LF, RF>(
        &self,
        left: &'a [L],
        right: &'a [R],
        left_key: LF,
        right_key: RF,
    ) -> Vec<(K, Vec<&'a L>, Vec<&'a R>)>
    where
        L: Sync,
        R: Sync,
        K: Ord + Send,
        LF: Fn(&L) -> K + Sync + Send,
        RF: Fn(&R) -> K + Sync + Send,
    {
        let left_keys = self.map_each(left, left_key);
        let right_keys = self.map_each(right, right_key);

        let mut groups: BTreeMap<K, (Vec<&'a L>, Vec<&'a R>)> = BTreeMap::new();
        for (k, item) in left_keys.into_iter().zip(left) {
            groups.entry(k).or_default().0.push(item);
        }
        for (k, item) in right_keys.into_iter().zip(right) {
            groups.entry(k).or_default().1.push(item);
        }
        groups.into_iter().map(|(k, (l, r))| (k, l, r)).collect()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self {
            mode: Mode::Global,
        }
    }
}
