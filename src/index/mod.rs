pub mod key;
pub mod bound;
pub mod structure;
pub mod result;
pub mod exact;
pub mod single_bound;
pub mod two_column;
