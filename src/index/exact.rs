use std::collections::{HashMap, HashSet};
use std::collections::hash_map::{self, Entry};
use crate::core::error::Result;
use crate::index::key::IndexKey;
use crate::index::structure::{Layer, SearchStructure};

/// Exact-match layer: one nested structure per distinct key value.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyStructure<K: IndexKey, S> {
    entries: HashMap<K, S>,
}

impl<K: IndexKey, S: SearchStructure> KeyStructure<K, S> {
    pub fn new() -> Self {
        KeyStructure {
            entries: HashMap::new(),
        }
    }

    /// Stores `nested` under `key`, merging into the structure already
    /// there so later columns keep accumulating under the same key.
    pub fn put(&mut self, key: K, nested: S) -> Result<()> {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(nested);
            }
            Entry::Occupied(mut slot) => {
                slot.get_mut().merge(nested)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, S> {
        self.entries.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, S> {
        self.entries.iter()
    }
}

impl<K: IndexKey, S: SearchStructure> Default for KeyStructure<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IndexKey, S: SearchStructure> SearchStructure for KeyStructure<K, S> {
    type Value = S::Value;

    fn collect_into(&self, out: &mut HashSet<S::Value>) {
        for nested in self.entries.values() {
            nested.collect_into(out);
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.values().all(S::is_empty)
    }

    fn check_merge(&self, other: &Self) -> Result<()> {
        for (key, nested) in &other.entries {
            if let Some(existing) = self.entries.get(key) {
                existing.check_merge(nested)?;
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) -> Result<()> {
        self.check_merge(&other)?;
        for (key, nested) in other.entries {
            self.put(key, nested)?;
        }
        Ok(())
    }
}

impl<K: IndexKey, S: SearchStructure> Layer for KeyStructure<K, S> {
    type Key = K;
    type Nested = S;

    fn find(&self, key: &K) -> Option<&S> {
        self.entries.get(key)
    }
}
