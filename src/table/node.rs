use std::collections::HashSet;
use chrono::NaiveDate;
use crate::core::config::{ColumnKind, ColumnSpec};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::KeyValue;
use crate::index::bound::TwoColumnRange;
use crate::index::exact::KeyStructure;
use crate::index::result::ResultStructure;
use crate::index::single_bound::RangeStructure;
use crate::index::structure::{Layer, ResultValue, SearchStructure};
use crate::index::two_column::TwoColumnRangeStructure;

/// Key of one source row for one column.
#[derive(Debug, Clone)]
pub enum ColumnKey {
    /// Exact key, or the single bound of a single-bound column
    /// (`KeyValue::Null` there is an open bound). In a two-bound column it
    /// stands for the one-point range, `Null` for the unbounded range.
    Value(KeyValue),
    Range(TwoColumnRange<KeyValue>),
}

impl ColumnKey {
    pub fn range(lower: Option<KeyValue>, upper: Option<KeyValue>, lower_inclusive: bool, upper_inclusive: bool) -> Result<Self> {
        let lower = lower.filter(|value| !value.is_null());
        let upper = upper.filter(|value| !value.is_null());
        Ok(ColumnKey::Range(TwoColumnRange::new(lower, upper, lower_inclusive, upper_inclusive)?))
    }
}

macro_rules! impl_column_key_from {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for ColumnKey {
            fn from(value: $t) -> Self {
                ColumnKey::Value(value.into())
            }
        })*
    };
}

impl_column_key_from!(KeyValue, bool, i32, i64, f64, NaiveDate, &str, String);

impl From<TwoColumnRange<KeyValue>> for ColumnKey {
    fn from(range: TwoColumnRange<KeyValue>) -> Self {
        ColumnKey::Range(range)
    }
}

/// One level of a config-driven index; every column is keyed by `KeyValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexNode<V: ResultValue> {
    Exact(KeyStructure<KeyValue, IndexNode<V>>),
    SingleBoundRange(RangeStructure<KeyValue, IndexNode<V>>),
    TwoBoundRange(TwoColumnRangeStructure<KeyValue, IndexNode<V>>),
    Leaf(ResultStructure<V>),
}

impl<V: ResultValue> IndexNode<V> {
    /// Empty node for the first of `columns`; a leaf when none remain.
    pub fn empty(columns: &[ColumnSpec]) -> Self {
        match columns.first().map(|column| column.kind) {
            None => IndexNode::Leaf(ResultStructure::new()),
            Some(ColumnKind::Exact) => IndexNode::Exact(KeyStructure::new()),
            Some(ColumnKind::SingleBound { range_type }) => IndexNode::SingleBoundRange(RangeStructure::new(range_type)),
            Some(ColumnKind::TwoBound) => IndexNode::TwoBoundRange(TwoColumnRangeStructure::new()),
        }
    }

    /// Builds the single-row chain `keys[0] -> keys[1] -> ... -> row`.
    /// Merging it into a root is how a row is inserted.
    pub fn path(columns: &[ColumnSpec], keys: Vec<ColumnKey>, row: V) -> Result<Self> {
        if columns.len() != keys.len() {
            return Err(Error::invalid_argument(format!(
                "row has {} keys but the index has {} columns",
                keys.len(),
                columns.len()
            )));
        }

        let mut node = IndexNode::Leaf(ResultStructure::with(row));
        for (column, key) in columns.iter().zip(keys).rev() {
            node = match (column.kind, key) {
                (ColumnKind::Exact, ColumnKey::Value(value)) => {
                    let mut layer = KeyStructure::new();
                    layer.put(value, node)?;
                    IndexNode::Exact(layer)
                }
                (ColumnKind::SingleBound { range_type }, ColumnKey::Value(value)) => {
                    let mut layer = RangeStructure::new(range_type);
                    layer.put(Some(value), node)?;
                    IndexNode::SingleBoundRange(layer)
                }
                (ColumnKind::TwoBound, ColumnKey::Value(value)) => {
                    let range = if value.is_null() {
                        TwoColumnRange::unbounded()
                    } else {
                        TwoColumnRange::point(value)
                    };
                    let mut layer = TwoColumnRangeStructure::new();
                    layer.put(range, node)?;
                    IndexNode::TwoBoundRange(layer)
                }
                (ColumnKind::TwoBound, ColumnKey::Range(range)) => {
                    let mut layer = TwoColumnRangeStructure::new();
                    layer.put(range, node)?;
                    IndexNode::TwoBoundRange(layer)
                }
                (_, ColumnKey::Range(range)) => {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        format!("column '{}' takes a single value, got range {}", column.name, range),
                    ));
                }
            };
        }
        Ok(node)
    }

    fn shape(&self) -> &'static str {
        match self {
            IndexNode::Exact(_) => "exact",
            IndexNode::SingleBoundRange(_) => "single-bound range",
            IndexNode::TwoBoundRange(_) => "two-bound range",
            IndexNode::Leaf(_) => "leaf",
        }
    }
}

impl<V: ResultValue> SearchStructure for IndexNode<V> {
    type Value = V;

    fn collect_into(&self, out: &mut HashSet<V>) {
        match self {
            IndexNode::Exact(layer) => layer.collect_into(out),
            IndexNode::SingleBoundRange(layer) => layer.collect_into(out),
            IndexNode::TwoBoundRange(layer) => layer.collect_into(out),
            IndexNode::Leaf(leaf) => leaf.collect_into(out),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            IndexNode::Exact(layer) => layer.is_empty(),
            IndexNode::SingleBoundRange(layer) => layer.is_empty(),
            IndexNode::TwoBoundRange(layer) => layer.is_empty(),
            IndexNode::Leaf(leaf) => leaf.is_empty(),
        }
    }

    fn check_merge(&self, other: &Self) -> Result<()> {
        match (self, other) {
            (IndexNode::Exact(layer), IndexNode::Exact(other)) => layer.check_merge(other),
            (IndexNode::SingleBoundRange(layer), IndexNode::SingleBoundRange(other)) => layer.check_merge(other),
            (IndexNode::TwoBoundRange(layer), IndexNode::TwoBoundRange(other)) => layer.check_merge(other),
            (IndexNode::Leaf(leaf), IndexNode::Leaf(other)) => leaf.check_merge(other),
            (this, other) => Err(Error::invalid_state(format!(
                "cannot merge {} node into {} node",
                other.shape(),
                this.shape()
            ))),
        }
    }

    fn merge(&mut self, other: Self) -> Result<()> {
        match (self, other) {
            (IndexNode::Exact(layer), IndexNode::Exact(other)) => layer.merge(other),
            (IndexNode::SingleBoundRange(layer), IndexNode::SingleBoundRange(other)) => layer.merge(other),
            (IndexNode::TwoBoundRange(layer), IndexNode::TwoBoundRange(other)) => layer.merge(other),
            (IndexNode::Leaf(leaf), IndexNode::Leaf(other)) => leaf.merge(other),
            (this, other) => Err(Error::invalid_state(format!(
                "cannot merge {} node into {} node",
                other.shape(),
                this.shape()
            ))),
        }
    }
}

impl<V: ResultValue> Layer for IndexNode<V> {
    type Key = KeyValue;
    type Nested = IndexNode<V>;

    fn find(&self, key: &KeyValue) -> Option<&IndexNode<V>> {
        match self {
            IndexNode::Exact(layer) => layer.find(key),
            IndexNode::SingleBoundRange(layer) => layer.find(key),
            IndexNode::TwoBoundRange(layer) => layer.find(key),
            IndexNode::Leaf(_) => None,
        }
    }
}
