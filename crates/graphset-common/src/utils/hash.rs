//! Hash map aliases used on hot paths.
//!
//! The hasher is seeded with fixed keys, so iteration order is stable
//! between runs of the same binary. Code that needs a *defined* order
//! (ascending identifiers, canonical labels) still sorts explicitly.

use std::hash::BuildHasherDefault;

/// Fast, non-cryptographic hasher.
pub type FxBuildHasher = BuildHasherDefault<ahash::AHasher>;

/// Hash map with the fast hasher.
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Hash set with the fast hasher.
pub type FxHashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;
