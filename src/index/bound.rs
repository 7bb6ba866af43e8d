use std::cmp::Ordering;
use std::fmt;
use crate::core::error::{Error, Result};

/// One edge of an interval; `None` on the build side maps to an infinity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bound<K> {
    NegativeInfinity,
    Value(K),
    PositiveInfinity,
}

impl<K> Bound<K> {
    pub fn lower(value: Option<K>) -> Self {
        value.map_or(Bound::NegativeInfinity, Bound::Value)
    }

    pub fn upper(value: Option<K>) -> Self {
        value.map_or(Bound::PositiveInfinity, Bound::Value)
    }

    pub fn is_infinite(&self) -> bool {
        !matches!(self, Bound::Value(_))
    }

    pub fn value(&self) -> Option<&K> {
        match self {
            Bound::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<K: Ord> Bound<K> {
    /// Position of this bound relative to a finite point.
    pub fn cmp_point(&self, point: &K) -> Ordering {
        match self {
            Bound::NegativeInfinity => Ordering::Less,
            Bound::Value(value) => value.cmp(point),
            Bound::PositiveInfinity => Ordering::Greater,
        }
    }
}

impl<K: fmt::Display> fmt::Display for Bound<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Bound::NegativeInfinity => write!(f, "-inf"),
            Bound::Value(value) => write!(f, "{}", value),
            Bound::PositiveInfinity => write!(f, "+inf"),
        }
    }
}

/// Interval key of a two-column (from/to) range column.
///
/// Ordering and equality look at the lower edge only: two ranges starting at
/// the same point compare equal whatever their upper bound is. The
/// overlap-splitting insert relies on this to replace a map entry in place
/// when a split keeps its start. Use [`TwoColumnRange::same_interval`] and
/// [`TwoColumnRange::cmp_upper_bound`] when the full interval matters.
///
/// Inclusivity flags of infinite bounds are always `false`.
#[derive(Debug, Clone)]
pub struct TwoColumnRange<K> {
    lower: Bound<K>,
    upper: Bound<K>,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

impl<K: Ord + Clone> TwoColumnRange<K> {
    pub fn new(lower: Option<K>, upper: Option<K>, lower_inclusive: bool, upper_inclusive: bool) -> Result<Self> {
        Self::from_bounds(Bound::lower(lower), Bound::upper(upper), lower_inclusive, upper_inclusive)
    }

    pub fn closed(lower: K, upper: K) -> Result<Self> {
        Self::new(Some(lower), Some(upper), true, true)
    }

    pub fn point(value: K) -> Self {
        TwoColumnRange {
            lower: Bound::Value(value.clone()),
            upper: Bound::Value(value),
            lower_inclusive: true,
            upper_inclusive: true,
        }
    }

    pub fn unbounded() -> Self {
        TwoColumnRange {
            lower: Bound::NegativeInfinity,
            upper: Bound::PositiveInfinity,
            lower_inclusive: false,
            upper_inclusive: false,
        }
    }

    pub fn from_bounds(lower: Bound<K>, upper: Bound<K>, lower_inclusive: bool, upper_inclusive: bool) -> Result<Self> {
        if matches!(lower, Bound::PositiveInfinity) {
            return Err(Error::invalid_argument("range lower bound cannot be +inf"));
        }
        if matches!(upper, Bound::NegativeInfinity) {
            return Err(Error::invalid_argument("range upper bound cannot be -inf"));
        }
        if lower > upper {
            return Err(Error::invalid_argument("range lower bound is after its upper bound"));
        }

        let lower_inclusive = lower_inclusive && !lower.is_infinite();
        let upper_inclusive = upper_inclusive && !upper.is_infinite();

        Self::span(lower, lower_inclusive, upper, upper_inclusive)
            .ok_or_else(|| Error::invalid_argument("range does not contain any point"))
    }

    /// Builds the interval if it is non-empty.
    fn span(lower: Bound<K>, lower_inclusive: bool, upper: Bound<K>, upper_inclusive: bool) -> Option<Self> {
        let non_empty = match lower.cmp(&upper) {
            Ordering::Less => true,
            Ordering::Equal => lower_inclusive && upper_inclusive,
            Ordering::Greater => false,
        };
        non_empty.then_some(TwoColumnRange {
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
        })
    }

    pub fn lower_bound(&self) -> &Bound<K> {
        &self.lower
    }

    pub fn upper_bound(&self) -> &Bound<K> {
        &self.upper
    }

    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    pub fn contains(&self, point: &K) -> bool {
        let above_lower = match self.lower.cmp_point(point) {
            Ordering::Less => true,
            Ordering::Equal => self.lower_inclusive,
            Ordering::Greater => false,
        };
        let below_upper = match self.upper.cmp_point(point) {
            Ordering::Greater => true,
            Ordering::Equal => self.upper_inclusive,
            Ordering::Less => false,
        };
        above_lower && below_upper
    }

    /// Compares lower edges: bound value first, then an inclusive edge
    /// starts before an exclusive one at the same value.
    pub fn cmp_lower_edge(&self, other: &Self) -> Ordering {
        self.lower
            .cmp(&other.lower)
            .then_with(|| other.lower_inclusive.cmp(&self.lower_inclusive))
    }

    /// Compares upper edges: an exclusive edge ends before an inclusive one
    /// at the same value.
    pub fn cmp_upper_bound(&self, other: &Self) -> Ordering {
        self.upper
            .cmp(&other.upper)
            .then_with(|| self.upper_inclusive.cmp(&other.upper_inclusive))
    }

    /// Full structural equality, upper edge included.
    pub fn same_interval(&self, other: &Self) -> bool {
        self.cmp_lower_edge(other) == Ordering::Equal && self.cmp_upper_bound(other) == Ordering::Equal
    }

    pub fn is_overlapping(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.cmp_lower_edge(other) == Ordering::Less { other } else { self };
        let end = if self.cmp_upper_bound(other) == Ordering::Greater { other } else { self };
        Self::span(start.lower.clone(), start.lower_inclusive, end.upper.clone(), end.upper_inclusive)
    }

    /// The part of `self` lying strictly before `other` starts.
    pub fn below(&self, other: &Self) -> Option<Self> {
        if other.lower.is_infinite() {
            return None;
        }
        // the edge just before other's lower edge
        let cut = TwoColumnRange {
            lower: Bound::NegativeInfinity,
            upper: other.lower.clone(),
            lower_inclusive: false,
            upper_inclusive: !other.lower_inclusive,
        };
        let end = if self.cmp_upper_bound(&cut) == Ordering::Greater { &cut } else { self };
        Self::span(self.lower.clone(), self.lower_inclusive, end.upper.clone(), end.upper_inclusive)
    }

    /// The part of `self` lying strictly after `other` ends.
    pub fn above(&self, other: &Self) -> Option<Self> {
        if other.upper.is_infinite() {
            return None;
        }
        // the edge just after other's upper edge
        let cut = TwoColumnRange {
            lower: other.upper.clone(),
            upper: Bound::PositiveInfinity,
            lower_inclusive: !other.upper_inclusive,
            upper_inclusive: false,
        };
        let start = if self.cmp_lower_edge(&cut) == Ordering::Less { &cut } else { self };
        Self::span(start.lower.clone(), start.lower_inclusive, self.upper.clone(), self.upper_inclusive)
    }
}

impl<K: Ord + Clone> PartialEq for TwoColumnRange<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_lower_edge(other) == Ordering::Equal
    }
}

impl<K: Ord + Clone> Eq for TwoColumnRange<K> {}

impl<K: Ord + Clone> PartialOrd for TwoColumnRange<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord + Clone> Ord for TwoColumnRange<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_lower_edge(other)
    }
}

impl<K: fmt::Display> fmt::Display for TwoColumnRange<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let open = if self.lower_inclusive { '[' } else { '(' };
        let close = if self.upper_inclusive { ']' } else { ')' };
        write!(f, "{}{}, {}{}", open, self.lower, self.upper, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lower: i32, upper: i32, li: bool, ui: bool) -> TwoColumnRange<i32> {
        TwoColumnRange::new(Some(lower), Some(upper), li, ui).unwrap()
    }

    #[test]
    fn infinities_surround_every_value() {
        assert!(Bound::NegativeInfinity < Bound::Value(i32::MIN));
        assert!(Bound::Value(i32::MAX) < Bound::PositiveInfinity);
        assert_eq!(Bound::<i32>::lower(None), Bound::NegativeInfinity);
        assert_eq!(Bound::<i32>::upper(None), Bound::PositiveInfinity);
    }

    #[test]
    fn touching_ranges_overlap_only_when_both_sides_include_the_point() {
        assert!(!range(5, 10, true, false).is_overlapping(&range(10, 12, true, false)));
        assert!(range(5, 10, true, true).is_overlapping(&range(10, 12, true, true)));
        assert!(!range(5, 10, true, true).is_overlapping(&range(10, 12, false, true)));
        assert!(range(1, 100, true, true).is_overlapping(&range(40, 50, true, true)));
    }

    #[test]
    fn exclusive_edges_reject_their_endpoints() {
        let r = range(120, 200, false, false);
        assert!(!r.contains(&120));
        assert!(!r.contains(&200));
        assert!(r.contains(&121));
        assert!(r.contains(&199));
    }

    #[test]
    fn malformed_ranges_fail_fast() {
        assert!(TwoColumnRange::new(Some(10), Some(5), true, true).is_err());
        assert!(TwoColumnRange::new(Some(5), Some(5), false, true).is_err());
        assert!(TwoColumnRange::<i32>::from_bounds(Bound::PositiveInfinity, Bound::PositiveInfinity, false, false).is_err());
        assert!(TwoColumnRange::new(Some(5), Some(5), true, true).is_ok());
    }

    #[test]
    fn equality_ignores_upper_bound() {
        let short = range(500, 550, true, true);
        let long = range(500, 600, true, true);
        assert_eq!(short, long);
        assert!(!short.same_interval(&long));
        assert_eq!(short.cmp_upper_bound(&long), Ordering::Less);
        assert_eq!(range(500, 600, true, true).cmp(&range(500, 600, false, true)), Ordering::Less);
    }

    #[test]
    fn unbounded_contains_everything() {
        let all = TwoColumnRange::<i32>::unbounded();
        assert!(all.contains(&i32::MIN));
        assert!(all.contains(&i32::MAX));
        let inf = TwoColumnRange::new(None, None, true, true).unwrap();
        assert!(!inf.lower_inclusive());
        assert!(inf.same_interval(&all));
    }

    #[test]
    fn split_pieces_toggle_inclusivity() {
        let existing = range(500, 600, true, true);
        let incoming = range(400, 550, true, true);

        let below = incoming.below(&existing).unwrap();
        assert!(below.same_interval(&range(400, 500, true, false)));

        let overlap = existing.intersection(&incoming).unwrap();
        assert!(overlap.same_interval(&range(500, 550, true, true)));

        let above = existing.above(&incoming).unwrap();
        assert!(above.same_interval(&range(550, 600, false, true)));

        assert!(existing.below(&TwoColumnRange::unbounded()).is_none());
    }

    #[test]
    fn display_marks_open_and_closed_edges() {
        assert_eq!(range(400, 500, true, false).to_string(), "[400, 500)");
        assert_eq!(TwoColumnRange::<i32>::unbounded().to_string(), "(-inf, +inf)");
    }
}
