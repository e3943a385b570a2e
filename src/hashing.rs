//! This module provides a deterministic hasher and `HashMap` and `HashSet` variants that use
//! it. The hashing data structures in the standard library are not deterministic:
//!
//! > By default, HashMap uses a hashing algorithm selected to provide
//! > resistance against HashDoS attacks. The algorithm is randomly seeded, and a
//! > reasonable best-effort is made to generate this seed from a high quality,
//! > secure source of randomness provided by the host without blocking the program.
//!
//! Iteration order of a map or set must not depend on the process, or two runs with the
//! same seed would diverge. `HashMap<K, V, S>` does not have a `new` method for a custom
//! hasher, so we provide the `HashMapExt` and `HashSetExt` traits. The traits need only be
//! in scope.
//!
//! The `hash_str` free function is used to derive per-stream seeds in `crate::random`.

use std::hash::Hasher;

use rustc_hash::FxHasher;
pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub trait HashMapExt {
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;
}

impl<K, V> HashMapExt for HashMap<K, V> {
    fn new() -> Self {
        HashMap::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity_and_hasher(capacity, Default::default())
    }
}

pub trait HashSetExt {
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;
}

impl<T> HashSetExt for HashSet<T> {
    fn new() -> Self {
        HashSet::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        HashSet::with_capacity_and_hasher(capacity, Default::default())
    }
}

/// A convenience method to compute the hash of a `&str`.
#[must_use]
pub fn hash_str(data: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_bytes());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_strings() {
        assert_eq!(hash_str("HouseholdRng"), hash_str("HouseholdRng"));
        assert_ne!(hash_str("HouseholdRng"), hash_str("PlaceRng"));
    }

    #[test]
    fn map_and_set_constructors() {
        let mut map: HashMap<&str, u32> = HashMap::new();
        map.insert("a", 1);
        let mut set: HashSet<u32> = HashSet::with_capacity(4);
        set.insert(1);
        set.insert(1);
        assert_eq!(map.len(), 1);
        assert_eq!(set.len(), 1);
    }
}
