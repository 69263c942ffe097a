//! Structural equality and hashing of nodes
//!
//! Two nodes are equal when they have the same type and equal values in every
//! element. The hash is computed once per node and cached in the node; a race
//! between threads computing it at the same time is harmless since both arrive
//! at the same value.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::Ordering;

use crate::node::Node;

impl Node {
    /// Cached structural hash
    pub fn structural_hash(&self) -> u64 {
        let cached = self.inner.hash.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }

        let mut hasher = DefaultHasher::new();
        self.type_name().hash(&mut hasher);
        self.slots().hash(&mut hasher);
        // 0 marks "not computed yet"
        let hash = match hasher.finish() {
            0 => 1,
            hash => hash,
        };
        self.inner.hash.store(hash, Ordering::Relaxed);
        hash
    }

    fn cached_hash(&self) -> Option<u64> {
        match self.inner.hash.load(Ordering::Relaxed) {
            0 => None,
            hash => Some(hash),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.type_name() != other.type_name() {
            return false;
        }
        if let (Some(a), Some(b)) = (self.cached_hash(), other.cached_hash()) {
            if a != b {
                return false;
            }
        }
        self.slots() == other.slots()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}
