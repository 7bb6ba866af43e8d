use std::fmt::Debug;
use std::hash::Hash;
use chrono::{NaiveDate, NaiveDateTime};
use crate::core::types::KeyValue;

/// A value usable as a key column.
///
/// Exact layers hash it, range layers order it. `is_null` marks a "null
/// object": a value that stands for "no value" and never matches a lookup.
pub trait IndexKey: Clone + Eq + Hash + Ord + Debug {
    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! impl_index_key {
    ($($t:ty),* $(,)?) => {
        $(impl IndexKey for $t {})*
    };
}

impl_index_key!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    bool, char, String, NaiveDate, NaiveDateTime,
);

impl IndexKey for &str {}

impl IndexKey for KeyValue {
    fn is_null(&self) -> bool {
        KeyValue::is_null(self)
    }
}
