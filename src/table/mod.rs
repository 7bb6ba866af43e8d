pub mod node;
pub mod table_index;
pub mod published;
