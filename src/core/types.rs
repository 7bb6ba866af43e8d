use serde::{Serialize, Deserialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use chrono::NaiveDate;

/// Identifier of one source row of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl RowId {
    pub fn new(id: u64) -> Self {
        RowId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        RowId(id)
    }
}

/// Dynamically typed key column value.
///
/// `Null` is the "null object": it is a legal value to carry around, but a
/// query with it never matches any stored key. `Integer` and `Number` share
/// one numeric order, so `Integer(2)` equals `Number(2.0)` and sorts below
/// `Number(2.5)`. Other variants order by variant (`Null` first); within a
/// variant they use their natural order, with numbers compared by
/// `f64::total_cmp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl KeyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, KeyValue::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            KeyValue::Null => 0,
            KeyValue::Bool(_) => 1,
            KeyValue::Integer(_) | KeyValue::Number(_) => 2,
            KeyValue::Date(_) => 3,
            KeyValue::Text(_) => 4,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            KeyValue::Null => "null",
            KeyValue::Bool(_) => "bool",
            KeyValue::Integer(_) => "integer",
            KeyValue::Number(_) => "number",
            KeyValue::Date(_) => "date",
            KeyValue::Text(_) => "text",
        }
    }

    /// The integer a number is exactly equal to, if any. `-0.0` has none.
    fn as_exact_integer(n: f64) -> Option<i64> {
        let fits = n.fract() == 0.0 && n >= -TWO_POW_63 && n < TWO_POW_63;
        (fits && !(n == 0.0 && n.is_sign_negative())).then(|| n as i64)
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Exact comparison of an integer against a float.
fn cmp_integer_number(a: i64, b: f64) -> Ordering {
    // rounding `a` is monotone, so only a tie needs the exact check; a tied
    // `b` is integral and within i128
    match (a as f64).total_cmp(&b) {
        Ordering::Equal => (a as i128).cmp(&(b as i128)),
        order => order,
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyValue {}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyValue::Null, KeyValue::Null) => Ordering::Equal,
            (KeyValue::Bool(a), KeyValue::Bool(b)) => a.cmp(b),
            (KeyValue::Integer(a), KeyValue::Integer(b)) => a.cmp(b),
            (KeyValue::Number(a), KeyValue::Number(b)) => a.total_cmp(b),
            (KeyValue::Integer(a), KeyValue::Number(b)) => cmp_integer_number(*a, *b),
            (KeyValue::Number(a), KeyValue::Integer(b)) => cmp_integer_number(*b, *a).reverse(),
            (KeyValue::Date(a), KeyValue::Date(b)) => a.cmp(b),
            (KeyValue::Text(a), KeyValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for KeyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            KeyValue::Null => {}
            KeyValue::Bool(b) => b.hash(state),
            KeyValue::Integer(i) => i.hash(state),
            KeyValue::Number(n) => match KeyValue::as_exact_integer(*n) {
                Some(i) => i.hash(state),
                // total_cmp equality is bitwise equality
                None => n.to_bits().hash(state),
            },
            KeyValue::Date(d) => d.hash(state),
            KeyValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyValue::Null => write!(f, "null"),
            KeyValue::Bool(b) => write!(f, "{}", b),
            KeyValue::Integer(i) => write!(f, "{}", i),
            KeyValue::Number(n) => write!(f, "{}", n),
            KeyValue::Date(d) => write!(f, "{}", d),
            KeyValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        KeyValue::Bool(value)
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        KeyValue::Integer(value)
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        KeyValue::Integer(value as i64)
    }
}

impl From<f64> for KeyValue {
    fn from(value: f64) -> Self {
        KeyValue::Number(value)
    }
}

impl From<NaiveDate> for KeyValue {
    fn from(value: NaiveDate) -> Self {
        KeyValue::Date(value)
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::Text(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::Text(value)
    }
}

impl<T: Into<KeyValue>> From<Option<T>> for KeyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(KeyValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn null_sorts_before_everything() {
        assert!(KeyValue::Null < KeyValue::Bool(false));
        assert!(KeyValue::Null < KeyValue::Integer(i64::MIN));
        assert!(KeyValue::Null < KeyValue::Text(String::new()));
    }

    #[test]
    fn numbers_use_total_order() {
        assert!(KeyValue::Number(-1.5) < KeyValue::Number(0.0));
        assert!(KeyValue::Number(f64::NEG_INFINITY) < KeyValue::Number(-1e300));
        assert_eq!(KeyValue::Number(2.0), KeyValue::Number(2.0));
    }

    #[test]
    fn hash_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(KeyValue::from("a"));
        set.insert(KeyValue::from("a".to_string()));
        set.insert(KeyValue::Number(1.0));
        set.insert(KeyValue::Number(1.0));
        set.insert(KeyValue::Integer(1));
        set.insert(KeyValue::Number(1.5));
        assert_eq!(set.len(), 3);
        assert!(set.contains(&KeyValue::Number(1.0)));
        assert!(set.contains(&KeyValue::Integer(1)));
    }

    #[test]
    fn integers_and_numbers_share_one_order() {
        assert_eq!(KeyValue::Integer(2), KeyValue::Number(2.0));
        assert!(KeyValue::Integer(2) < KeyValue::Number(2.5));
        assert!(KeyValue::Number(2.5) < KeyValue::Integer(5));
        assert!(KeyValue::Number(1.0) < KeyValue::Integer(18));
        assert!(KeyValue::Number(-0.0) < KeyValue::Integer(0));
        assert!(KeyValue::Number(f64::NEG_INFINITY) < KeyValue::Integer(i64::MIN));
        assert!(KeyValue::Integer(i64::MAX) < KeyValue::Number(f64::INFINITY));
        // 2^53 + 1 rounds to 2^53 as a float
        assert!(KeyValue::Integer((1 << 53) + 1) > KeyValue::Number((1u64 << 53) as f64));
        assert!(KeyValue::Number(1e300) < KeyValue::Date(NaiveDate::MIN));
    }

    #[test]
    fn untagged_json_maps_onto_variants() {
        let values: Vec<KeyValue> =
            serde_json::from_str(r#"[null, true, 7, 2.5, "2024-02-29", "gold"]"#).unwrap();
        assert_eq!(values[0], KeyValue::Null);
        assert_eq!(values[1], KeyValue::Bool(true));
        assert_eq!(values[2], KeyValue::Integer(7));
        assert_eq!(values[3], KeyValue::Number(2.5));
        assert_eq!(values[4], KeyValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert_eq!(values[5], KeyValue::from("gold"));
    }
}
