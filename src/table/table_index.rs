use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;
use crate::core::config::IndexConfig;
use crate::core::error::{Error, Result};
use crate::core::types::KeyValue;
use crate::index::structure::{unique, Layer, Lookup, ResultValue, SearchStructure};
use crate::table::node::{ColumnKey, IndexNode};

/// Composed index over all key columns of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableIndex<V: ResultValue> {
    pub config: IndexConfig,
    root: IndexNode<V>,
    row_count: usize,
}

impl<V: ResultValue> TableIndex<V> {
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let root = IndexNode::empty(&config.columns);
        debug!(table = %config.table, columns = config.columns.len(), "created table index");

        Ok(TableIndex {
            config,
            root,
            row_count: 0,
        })
    }

    /// Adds one source row under its keys, one key per column in order.
    pub fn insert(&mut self, keys: Vec<ColumnKey>, row: V) -> Result<()> {
        let path = IndexNode::path(&self.config.columns, keys, row)?;
        self.root.merge(path)?;
        self.row_count += 1;
        Ok(())
    }

    pub fn extend<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = (Vec<ColumnKey>, V)>,
    {
        let before = self.row_count;
        for (keys, row) in rows {
            self.insert(keys, row)?;
        }
        debug!(table = %self.config.table, added = self.row_count - before, total = self.row_count, "indexed rows");
        Ok(())
    }

    pub fn root(&self) -> &IndexNode<V> {
        &self.root
    }

    /// Starts a chained `get(..).get(..)` lookup at the first column.
    pub fn get(&self, key: Option<&KeyValue>) -> Lookup<'_, IndexNode<V>> {
        self.root.get(key)
    }

    /// All rows matching one query value per column.
    pub fn lookup(&self, keys: &[KeyValue]) -> Result<HashSet<V>> {
        self.check_arity(keys.len())?;
        let mut current = Lookup::new(Some(&self.root));
        for key in keys {
            current = current.get(Some(key));
            if current.node().is_none() {
                break;
            }
        }
        Ok(current.values())
    }

    pub fn lookup_unique(&self, keys: &[KeyValue]) -> Result<V> {
        unique(self.lookup(keys)?)
    }

    /// Evaluates independent queries in parallel; reads never mutate.
    pub fn lookup_batch(&self, queries: &[Vec<KeyValue>]) -> Vec<Result<HashSet<V>>>
    where
        V: Send + Sync,
    {
        queries.par_iter().map(|keys| self.lookup(keys)).collect()
    }

    /// Folds another index with the same column layout into this one.
    pub fn merge(&mut self, other: TableIndex<V>) -> Result<()> {
        if other.config.columns != self.config.columns {
            return Err(Error::invalid_state(format!(
                "cannot merge index of '{}' into '{}': column layouts differ",
                other.config.table, self.config.table
            )));
        }
        self.root.merge(other.root)?;
        self.row_count += other.row_count;
        Ok(())
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Number of rows inserted, duplicates included.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn check_arity(&self, given: usize) -> Result<()> {
        if given != self.config.columns.len() {
            return Err(Error::invalid_argument(format!(
                "query has {} keys but table '{}' has {} columns",
                given,
                self.config.table,
                self.config.columns.len()
            )));
        }
        Ok(())
    }
}
