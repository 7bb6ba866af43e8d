use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;
use crate::core::error::Result;
use crate::index::structure::ResultValue;
use crate::table::table_index::TableIndex;

/// Copy-then-swap holder for a table index that is refreshed while queries
/// are in flight.
///
/// Readers take an `Arc` snapshot and query it without locking. A writer
/// deep-copies the current index, mutates the copy, and swaps it in; readers
/// holding the previous snapshot keep seeing it unchanged.
pub struct PublishedIndex<V: ResultValue> {
    current: RwLock<Arc<TableIndex<V>>>,
    version: AtomicU64,
    writer: Mutex<()>, // single writer
}

impl<V: ResultValue> PublishedIndex<V> {
    pub fn new(index: TableIndex<V>) -> Self {
        PublishedIndex {
            current: RwLock::new(Arc::new(index)),
            version: AtomicU64::new(0),
            writer: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Arc<TableIndex<V>> {
        self.current.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Applies `mutate` to a copy of the current index and publishes the
    /// copy. On error nothing is published. Returns the new version.
    pub fn update<F>(&self, mutate: F) -> Result<u64>
    where
        F: FnOnce(&mut TableIndex<V>) -> Result<()>,
    {
        let _writer = self.writer.lock();

        let mut next = self.snapshot().copy();
        mutate(&mut next)?;
        Ok(self.swap(next))
    }

    /// Replaces the current index wholesale.
    pub fn publish(&self, index: TableIndex<V>) -> u64 {
        let _writer = self.writer.lock();
        self.swap(index)
    }

    fn swap(&self, index: TableIndex<V>) -> u64 {
        let table = index.config.table.clone();
        let rows = index.row_count();
        *self.current.write() = Arc::new(index);

        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        info!(table = %table, version, rows, "published index snapshot");
        version
    }
}
