use std::collections::HashSet;
use std::collections::hash_set;
use crate::core::error::Result;
use crate::index::structure::{ResultValue, SearchStructure};

/// Leaf of a composed index: the rows reachable through one key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultStructure<V: ResultValue> {
    values: HashSet<V>,
}

impl<V: ResultValue> ResultStructure<V> {
    pub fn new() -> Self {
        ResultStructure {
            values: HashSet::new(),
        }
    }

    pub fn with(value: V) -> Self {
        let mut leaf = Self::new();
        leaf.put(value);
        leaf
    }

    /// Returns false when an equal value was already present.
    pub fn put(&mut self, value: V) -> bool {
        self.values.insert(value)
    }

    pub fn get(&self) -> &HashSet<V> {
        &self.values
    }

    pub fn contains(&self, value: &V) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, V> {
        self.values.iter()
    }
}

impl<V: ResultValue> Default for ResultStructure<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ResultValue> FromIterator<V> for ResultStructure<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        ResultStructure {
            values: iter.into_iter().collect(),
        }
    }
}

impl<V: ResultValue> SearchStructure for ResultStructure<V> {
    type Value = V;

    fn collect_into(&self, out: &mut HashSet<V>) {
        out.extend(self.values.iter().cloned());
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn merge(&mut self, other: Self) -> Result<()> {
        self.values.extend(other.values);
        Ok(())
    }

    fn values(&self) -> HashSet<V> {
        self.values.clone()
    }
}
