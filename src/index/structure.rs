use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use crate::core::error::{Error, ErrorKind, Result};
use crate::index::key::IndexKey;

/// Anything that can sit in a leaf result set.
pub trait ResultValue: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> ResultValue for T {}

/// Read/merge contract shared by every layer and by the leaf.
pub trait SearchStructure: Clone + PartialEq + Debug {
    type Value: ResultValue;

    /// Adds every result value reachable from this node to `out`.
    fn collect_into(&self, out: &mut HashSet<Self::Value>);

    /// True when no result value is reachable from this node.
    fn is_empty(&self) -> bool;

    /// Fails with the error `merge` would hit, without changing anything.
    fn check_merge(&self, _other: &Self) -> Result<()> {
        Ok(())
    }

    /// Folds `other` into `self` as if every put that built `other` had
    /// been issued against `self`. On error `self` is left unchanged.
    fn merge(&mut self, other: Self) -> Result<()>;

    fn values(&self) -> HashSet<Self::Value> {
        let mut out = HashSet::new();
        self.collect_into(&mut out);
        out
    }

    fn get_unique(&self) -> Result<Self::Value> {
        unique(self.values())
    }

    /// Deep structural copy; the result shares nothing mutable with `self`.
    fn copy(&self) -> Self {
        self.clone()
    }
}

/// A structure keyed by one column, nesting another structure per key.
pub trait Layer: SearchStructure {
    type Key: IndexKey;
    type Nested: SearchStructure<Value = Self::Value>;

    /// The nested structure matching a non-null key, if any.
    fn find(&self, key: &Self::Key) -> Option<&Self::Nested>;

    /// Never fails: absent and null-object keys yield an empty lookup.
    fn get(&self, key: Option<&Self::Key>) -> Lookup<'_, Self::Nested> {
        let node = key
            .filter(|key| !key.is_null())
            .and_then(|key| self.find(key));
        Lookup::new(node)
    }
}

/// Result of one `get` step. Empty when nothing matched; further `get`
/// calls on an empty lookup stay empty.
#[derive(Debug)]
pub struct Lookup<'a, S> {
    node: Option<&'a S>,
}

impl<'a, S> Clone for Lookup<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S> Copy for Lookup<'a, S> {}

impl<'a, S: SearchStructure> Lookup<'a, S> {
    pub fn new(node: Option<&'a S>) -> Self {
        Lookup { node }
    }

    pub fn empty() -> Self {
        Lookup { node: None }
    }

    pub fn node(&self) -> Option<&'a S> {
        self.node
    }

    pub fn is_empty(&self) -> bool {
        self.node.map_or(true, |node| node.is_empty())
    }

    pub fn values(&self) -> HashSet<S::Value> {
        self.node.map(|node| node.values()).unwrap_or_default()
    }

    pub fn get_unique(&self) -> Result<S::Value> {
        unique(self.values())
    }
}

impl<'a, S: Layer> Lookup<'a, S> {
    pub fn get(&self, key: Option<&S::Key>) -> Lookup<'a, S::Nested> {
        match self.node {
            Some(node) => node.get(key),
            None => Lookup::empty(),
        }
    }
}

pub(crate) fn unique<V: Debug>(values: HashSet<V>) -> Result<V> {
    let count = values.len();
    let mut iter = values.into_iter();
    match (iter.next(), count) {
        (Some(value), 1) => Ok(value),
        (None, _) => Err(Error::new(
            ErrorKind::NotFound,
            "no unique result: nothing matched".to_string(),
        )),
        _ => Err(Error::new(
            ErrorKind::Ambiguous,
            format!("ambiguous result: {} values matched", count),
        )),
    }
}
