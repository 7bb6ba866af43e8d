use serde::{Serialize, Deserialize};
use std::collections::{BTreeMap, HashSet};
use std::collections::btree_map::{self, Entry};
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};
use std::str::FromStr;
use tracing::trace;
use crate::core::error::{Error, ErrorKind, Result};
use crate::index::bound::Bound;
use crate::index::key::IndexKey;
use crate::index::structure::{Layer, SearchStructure};

/// How a single stored key bounds the range it starts or ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    /// Stored key is an exclusive lower bound. Deprecated, kept for old tables.
    LowerBound,
    /// Stored key is an inclusive lower bound.
    LowerBoundEqual,
    /// Stored key is an exclusive upper bound. Deprecated, kept for old tables.
    UpperBound,
    /// Stored key is an inclusive upper bound.
    UpperBoundEqual,
}

impl RangeType {
    pub fn is_lower(self) -> bool {
        matches!(self, RangeType::LowerBound | RangeType::LowerBoundEqual)
    }

    pub fn is_inclusive(self) -> bool {
        matches!(self, RangeType::LowerBoundEqual | RangeType::UpperBoundEqual)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RangeType::LowerBound => "LOWER_BOUND",
            RangeType::LowerBoundEqual => "LOWER_BOUND_EQUAL",
            RangeType::UpperBound => "UPPER_BOUND",
            RangeType::UpperBoundEqual => "UPPER_BOUND_EQUAL",
        }
    }
}

impl FromStr for RangeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LOWER_BOUND" => Ok(RangeType::LowerBound),
            "LOWER_BOUND_EQUAL" => Ok(RangeType::LowerBoundEqual),
            "UPPER_BOUND" => Ok(RangeType::UpperBound),
            "UPPER_BOUND_EQUAL" => Ok(RangeType::UpperBoundEqual),
            other => Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("unknown range type '{}'", other),
            )),
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-bound range layer: a step function over the key column.
///
/// Each stored key marks where the matching nested structure changes; the
/// other end of its range is the neighbouring stored key. An open (`None`)
/// bound is stored as the infinity on the side the range type extends to.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeStructure<K: IndexKey, S> {
    range_type: RangeType,
    entries: BTreeMap<Bound<K>, S>,
}

impl<K: IndexKey, S: SearchStructure> RangeStructure<K, S> {
    pub fn new(range_type: RangeType) -> Self {
        RangeStructure {
            range_type,
            entries: BTreeMap::new(),
        }
    }

    /// Builds a layer from a range type name such as `LOWER_BOUND_EQUAL`.
    pub fn try_new(range_type: &str) -> Result<Self> {
        Ok(Self::new(range_type.parse()?))
    }

    pub fn range_type(&self) -> RangeType {
        self.range_type
    }

    pub fn put(&mut self, key: Option<K>, nested: S) -> Result<()> {
        let key = key.filter(|key| !key.is_null());
        let bound = if self.range_type.is_lower() {
            Bound::lower(key)
        } else {
            Bound::upper(key)
        };
        trace!(range_type = %self.range_type, bound = ?bound, "single-bound put");

        match self.entries.entry(bound) {
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

    pub fn iter(&self) -> btree_map::Iter<'_, Bound<K>, S> {
        self.entries.iter()
    }
}

impl<K: IndexKey, S: SearchStructure> SearchStructure for RangeStructure<K, S> {
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
        if other.range_type != self.range_type {
            return Err(Error::invalid_state(format!(
                "cannot merge {} range layer into {} range layer",
                other.range_type, self.range_type
            )));
        }
        for (bound, nested) in &other.entries {
            if let Some(existing) = self.entries.get(bound) {
                existing.check_merge(nested)?;
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) -> Result<()> {
        self.check_merge(&other)?;
        // stored bounds are already resolved, bypass put's conversion
        for (bound, nested) in other.entries {
            match self.entries.entry(bound) {
                Entry::Vacant(slot) => {
                    slot.insert(nested);
                }
                Entry::Occupied(mut slot) => {
                    slot.get_mut().merge(nested)?;
                }
            }
        }
        Ok(())
    }
}

impl<K: IndexKey, S: SearchStructure> Layer for RangeStructure<K, S> {
    type Key = K;
    type Nested = S;

    fn find(&self, key: &K) -> Option<&S> {
        let probe = Bound::Value(key.clone());
        let found = match self.range_type {
            RangeType::LowerBoundEqual => self.entries.range(..=probe).next_back(),
            RangeType::LowerBound => self.entries.range(..probe).next_back(),
            RangeType::UpperBoundEqual => self.entries.range(probe..).next(),
            RangeType::UpperBound => self.entries.range((Excluded(probe), Unbounded)).next(),
        };
        found.map(|(_, nested)| nested)
    }
}
