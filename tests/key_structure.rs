use std::collections::HashSet;
use Tabulex::core::error::ErrorKind;
use Tabulex::index::exact::KeyStructure;
use Tabulex::index::result::ResultStructure;
use Tabulex::index::single_bound::{RangeStructure, RangeType};
use Tabulex::index::structure::{Layer, SearchStructure};
use Tabulex::table::node::IndexNode;

type Leaf = ResultStructure<&'static str>;

fn set(values: &[&'static str]) -> HashSet<&'static str> {
    values.iter().copied().collect()
}

#[test]
fn empty_structure_matches_nothing() {
    let index: KeyStructure<String, Leaf> = KeyStructure::new();
    assert!(index.get(Some(&"anything".to_string())).values().is_empty());
    assert!(index.get(None).values().is_empty());
    assert!(index.get(None).is_empty());
    assert!(index.values().is_empty());
}

#[test]
fn put_then_get_returns_value() {
    let mut index = KeyStructure::new();
    index.put("gold".to_string(), Leaf::with("A")).unwrap();
    index.put("silver".to_string(), Leaf::with("B")).unwrap();

    assert_eq!(index.get(Some(&"gold".to_string())).values(), set(&["A"]));
    assert_eq!(index.get(Some(&"silver".to_string())).values(), set(&["B"]));
    assert!(index.get(Some(&"bronze".to_string())).values().is_empty());
    assert_eq!(index.values(), set(&["A", "B"]));
}

#[test]
fn repeated_put_unions_results() {
    let mut index = KeyStructure::new();
    index.put(7, Leaf::with("A")).unwrap();
    index.put(7, Leaf::with("B")).unwrap();
    index.put(7, Leaf::with("A")).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.get(Some(&7)).values(), set(&["A", "B"]));
}

#[test]
fn second_put_descends_into_same_nested_layer() {
    let mut index: KeyStructure<&str, RangeStructure<i32, Leaf>> = KeyStructure::new();

    let mut first = RangeStructure::new(RangeType::LowerBoundEqual);
    first.put(Some(10), Leaf::with("ten")).unwrap();
    index.put("a", first).unwrap();

    let mut second = RangeStructure::new(RangeType::LowerBoundEqual);
    second.put(Some(20), Leaf::with("twenty")).unwrap();
    index.put("a", second).unwrap();

    assert_eq!(index.len(), 1);
    let nested = index.get(Some(&"a"));
    assert_eq!(nested.get(Some(&15)).values(), set(&["ten"]));
    assert_eq!(nested.get(Some(&25)).values(), set(&["twenty"]));
    assert!(nested.get(Some(&5)).values().is_empty());
    assert!(index.get(Some(&"b")).get(Some(&15)).values().is_empty());
}

#[test]
fn get_unique_reports_missing_and_ambiguous() {
    let mut index = KeyStructure::new();
    index.put(1, Leaf::with("A")).unwrap();
    index.put(2, Leaf::with("B")).unwrap();
    index.put(2, Leaf::with("C")).unwrap();

    assert_eq!(index.get(Some(&1)).get_unique().unwrap(), "A");
    assert_eq!(index.get(Some(&3)).get_unique().unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(index.get(Some(&2)).get_unique().unwrap_err().kind, ErrorKind::Ambiguous);
}

#[test]
fn copy_is_equal_but_independent() {
    let mut original = KeyStructure::new();
    original.put("x", Leaf::with("A")).unwrap();
    original.put("y", Leaf::with("B")).unwrap();

    let mut copy = original.copy();
    assert_eq!(copy, original);

    copy.put("x", Leaf::with("C")).unwrap();
    copy.put("z", Leaf::with("D")).unwrap();

    assert_ne!(copy, original);
    assert_eq!(original.get(Some(&"x")).values(), set(&["A"]));
    assert!(original.get(Some(&"z")).values().is_empty());
    assert_eq!(copy.get(Some(&"x")).values(), set(&["A", "C"]));
}

#[test]
fn merge_behaves_like_sequential_puts() {
    let mut left = KeyStructure::new();
    left.put(1, Leaf::with("A")).unwrap();

    let mut right = KeyStructure::new();
    right.put(1, Leaf::with("B")).unwrap();
    right.put(2, Leaf::with("C")).unwrap();

    left.merge(right).unwrap();
    assert_eq!(left.get(Some(&1)).values(), set(&["A", "B"]));
    assert_eq!(left.get(Some(&2)).values(), set(&["C"]));
}

#[test]
fn failed_merge_changes_nothing() {
    let mut index: KeyStructure<&'static str, IndexNode<&'static str>> = KeyStructure::new();
    index.put("a", IndexNode::Leaf(Leaf::with("A"))).unwrap();
    index.put("b", IndexNode::Leaf(Leaf::with("B"))).unwrap();
    let before = index.copy();

    let mut other = KeyStructure::new();
    other.put("a", IndexNode::Leaf(Leaf::with("C"))).unwrap();
    other.put("b", IndexNode::SingleBoundRange(RangeStructure::new(RangeType::LowerBound))).unwrap();

    assert_eq!(index.merge(other).unwrap_err().kind, ErrorKind::InvalidState);
    assert_eq!(index, before);
    assert_eq!(index.get(Some(&"a")).values(), set(&["A"]));
}
