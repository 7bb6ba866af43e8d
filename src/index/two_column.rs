use std::collections::{BTreeMap, HashSet};
use std::collections::btree_map;
use tracing::{debug, trace};
use crate::core::error::Result;
use crate::index::bound::TwoColumnRange;
use crate::index::key::IndexKey;
use crate::index::structure::{Layer, SearchStructure};

/// Two-column (from/to) range layer.
///
/// Stored intervals never overlap. Inserting an interval that overlaps
/// existing ones splits them at the overlap edges, so every resulting piece
/// already holds the merge of all nested structures covering it.
#[derive(Debug, Clone)]
pub struct TwoColumnRangeStructure<K: IndexKey, S> {
    entries: BTreeMap<TwoColumnRange<K>, S>,
}

impl<K: IndexKey, S: SearchStructure> TwoColumnRangeStructure<K, S> {
    pub fn new() -> Self {
        TwoColumnRangeStructure {
            entries: BTreeMap::new(),
        }
    }

    /// `None` bounds are infinite.
    pub fn put_bounds(
        &mut self,
        lower: Option<K>,
        upper: Option<K>,
        lower_inclusive: bool,
        upper_inclusive: bool,
        nested: S,
    ) -> Result<()> {
        let range = TwoColumnRange::new(lower, upper, lower_inclusive, upper_inclusive)?;
        self.put(range, nested)
    }

    pub fn put_closed(&mut self, lower: Option<K>, upper: Option<K>, nested: S) -> Result<()> {
        self.put_bounds(lower, upper, true, true, nested)
    }

    pub fn put(&mut self, range: TwoColumnRange<K>, nested: S) -> Result<()> {
        let overlapping = self.overlapping(&range);
        // nothing is split until every overlapped entry accepts `nested`
        for existing in &overlapping {
            if let Some(value) = self.entries.get(existing) {
                value.check_merge(&nested)?;
            }
        }
        if overlapping.is_empty() {
            trace!(range = ?range, "two-column put without overlap");
            self.entries.insert(range, nested);
            return Ok(());
        }

        let before = self.entries.len();
        // part of the incoming range not yet matched against an existing entry
        let mut rest = Some(range.clone());

        for existing in overlapping {
            let Some((existing, value)) = self.entries.remove_entry(&existing) else {
                continue;
            };

            if let Some(head) = existing.below(&range) {
                trace!(piece = ?head, "keep head of split entry");
                self.entries.insert(head, value.clone());
            }
            if let Some(tail) = existing.above(&range) {
                trace!(piece = ?tail, "keep tail of split entry");
                self.entries.insert(tail, value.clone());
            }

            if let Some(pending) = &rest {
                if let Some(gap) = pending.below(&existing) {
                    trace!(piece = ?gap, "new-only piece");
                    self.entries.insert(gap, nested.clone());
                }
            }

            if let Some(shared) = existing.intersection(&range) {
                let mut merged = value;
                merged.merge(nested.clone())?;
                trace!(piece = ?shared, "overlapping piece");
                self.entries.insert(shared, merged);
            }

            rest = rest.and_then(|pending| pending.above(&existing));
        }

        if let Some(pending) = rest {
            trace!(piece = ?pending, "new-only piece");
            self.entries.insert(pending, nested);
        }

        debug!(
            range = ?range,
            entries_before = before,
            entries_after = self.entries.len(),
            "two-column put split overlapping entries"
        );
        Ok(())
    }

    /// Stored ranges sharing at least one point with `range`, in order.
    fn overlapping(&self, range: &TwoColumnRange<K>) -> Vec<TwoColumnRange<K>> {
        // only the nearest entry starting before `range` can reach into it
        let preceding = self
            .entries
            .range(..range.clone())
            .next_back()
            .map(|(stored, _)| stored)
            .filter(|stored| stored.is_overlapping(range));

        let following = self
            .entries
            .range(range.clone()..)
            .map(|(stored, _)| stored)
            .take_while(|stored| stored.is_overlapping(range));

        preceding.into_iter().chain(following).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, TwoColumnRange<K>, S> {
        self.entries.iter()
    }

    pub fn ranges(&self) -> btree_map::Keys<'_, TwoColumnRange<K>, S> {
        self.entries.keys()
    }
}

impl<K: IndexKey, S: SearchStructure> Default for TwoColumnRangeStructure<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IndexKey, S: SearchStructure> PartialEq for TwoColumnRangeStructure<K, S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((a, x), (b, y))| a.same_interval(b) && x == y)
    }
}

impl<K: IndexKey, S: SearchStructure> SearchStructure for TwoColumnRangeStructure<K, S> {
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
        for (range, nested) in &other.entries {
            for existing in self.overlapping(range) {
                if let Some(value) = self.entries.get(&existing) {
                    value.check_merge(nested)?;
                }
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) -> Result<()> {
        self.check_merge(&other)?;
        for (range, nested) in other.entries {
            self.put(range, nested)?;
        }
        Ok(())
    }
}

impl<K: IndexKey, S: SearchStructure> Layer for TwoColumnRangeStructure<K, S> {
    type Key = K;
    type Nested = S;

    fn find(&self, key: &K) -> Option<&S> {
        // entries are disjoint: only the last one starting at or before `key`
        // can contain it
        self.entries
            .range(..=TwoColumnRange::point(key.clone()))
            .next_back()
            .filter(|(stored, _)| stored.contains(key))
            .map(|(_, nested)| nested)
    }
}
