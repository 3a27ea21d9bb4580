//! Core store implementation for feedstore.
//!
//! This module defines the `FeedStore` facade along with the feed registry,
//! the data store and the cursor table behind it.

use crate::config::{AppendOptions, Config, DataFilter, DataPoint, Feed, PointId, StoreStats};
use crate::error::{Result, StoreError};
use crate::storage::{FeedBackend, MemoryBackend};

mod cursor;
mod data;
mod registry;

pub use cursor::Cursor;
pub use data::DataStore;
pub use registry::FeedRegistry;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Time-series feed store.
///
/// Combines a `FeedRegistry` and a `DataStore` over one backend.
/// - **Registry**: feed lookup, explicit and on-demand creation
/// - **Data**: point lifecycle, filtered listing and stream cursors
///
/// Thread-safe; clones share the backend and the cursors.
#[derive(Clone)]
pub struct FeedStore {
    pub(crate) registry: FeedRegistry,
    pub(crate) data: Arc<DataStore>,
    pub(crate) backend: Arc<dyn FeedBackend>,
    pub(crate) closed: Arc<AtomicBool>,
    pub(crate) ops_count: Arc<AtomicU64>,
}

impl FeedStore {
    /// Create a store over the given backend.
    ///
    /// A configuration that fails [`Config::validate`] is rejected with
    /// `InvalidState`: the store cannot be brought into a usable state.
    pub fn open(backend: Arc<dyn FeedBackend>, config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| StoreError::InvalidState(format!("invalid configuration: {}", e)))?;

        Ok(Self {
            registry: FeedRegistry::new(Arc::clone(&backend)),
            data: Arc::new(DataStore::new(Arc::clone(&backend), config)),
            backend,
            closed: Arc::new(AtomicBool::new(false)),
            ops_count: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn builder() -> crate::builder::FeedStoreBuilder {
        crate::builder::FeedStoreBuilder::new()
    }

    /// Create an in-memory store with default configuration.
    pub fn memory() -> Result<Self> {
        Self::memory_with_config(Config::default())
    }

    /// Create an in-memory store with custom configuration.
    pub fn memory_with_config(config: Config) -> Result<Self> {
        Self::open(Arc::new(MemoryBackend::new()), config)
    }

    /// Feed registry sharing this store's backend.
    ///
    /// Fails with `Unavailable` once the store is closed.
    pub fn registry(&self) -> Result<&FeedRegistry> {
        self.ensure_open()?;
        Ok(&self.registry)
    }

    /// Data store sharing this store's backend and cursors.
    ///
    /// Fails with `Unavailable` once the store is closed.
    pub fn data(&self) -> Result<&DataStore> {
        self.ensure_open()?;
        Ok(&self.data)
    }

    pub fn config(&self) -> &Config {
        self.data.config()
    }

    #[inline]
    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("store is closed".to_string()));
        }
        Ok(())
    }

    #[inline]
    fn begin(&self) -> Result<()> {
        self.ensure_open()?;
        self.ops_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Get a feed by key.
    pub fn get_feed(&self, key: &str) -> Result<Feed> {
        self.begin()?;
        self.registry.get(key)
    }

    /// Get a feed, creating a placeholder if it does not exist.
    pub fn ensure_feed(&self, key: &str) -> Result<Feed> {
        self.begin()?;
        self.registry.ensure(key)
    }

    /// Create a feed with an optional display name.
    pub fn create_feed(&self, key: &str, name: Option<&str>) -> Result<Feed> {
        self.begin()?;
        self.registry.create(key, name)
    }

    pub fn feed_exists(&self, key: &str) -> Result<bool> {
        self.begin()?;
        self.registry.exists(key)
    }

    /// Append a value to a feed.
    pub fn append(&self, feed_key: &str, value: &str) -> Result<DataPoint> {
        self.begin()?;
        self.data.append(feed_key, value)
    }

    pub fn append_with(
        &self,
        feed_key: &str,
        value: &str,
        opts: AppendOptions,
    ) -> Result<DataPoint> {
        self.begin()?;
        self.data.append_with(feed_key, value, opts)
    }

    /// Append to an existing feed only.
    pub fn create(&self, feed_key: &str, value: &str) -> Result<DataPoint> {
        self.begin()?;
        self.data.create(feed_key, value)
    }

    pub fn append_batch(&self, feed_key: &str, values: &[String]) -> Result<Vec<DataPoint>> {
        self.begin()?;
        self.data.append_batch(feed_key, values)
    }

    pub fn get(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        self.begin()?;
        self.data.get(feed_key, id)
    }

    pub fn update(&self, feed_key: &str, id: PointId, value: &str) -> Result<DataPoint> {
        self.begin()?;
        self.data.update(feed_key, id, value)
    }

    pub fn delete(&self, feed_key: &str, id: PointId) -> Result<()> {
        self.begin()?;
        self.data.delete(feed_key, id)
    }

    /// Points of a feed, newest first.
    pub fn list(&self, feed_key: &str, filter: Option<&DataFilter>) -> Result<Vec<DataPoint>> {
        self.begin()?;
        self.data.list(feed_key, filter)
    }

    pub fn len(&self, feed_key: &str) -> Result<usize> {
        self.begin()?;
        self.data.len(feed_key)
    }

    pub fn is_empty(&self, feed_key: &str) -> Result<bool> {
        self.begin()?;
        self.data.is_empty(feed_key)
    }

    pub fn last(&self, feed_key: &str) -> Result<DataPoint> {
        self.begin()?;
        self.data.last(feed_key)
    }

    pub fn first(&self, feed_key: &str) -> Result<DataPoint> {
        self.begin()?;
        self.data.first(feed_key)
    }

    pub fn prev(&self, feed_key: &str) -> Result<DataPoint> {
        self.begin()?;
        self.data.prev(feed_key)
    }

    pub fn next(&self, feed_key: &str) -> Result<DataPoint> {
        self.begin()?;
        self.data.next(feed_key)
    }

    /// Current cursor position of a feed, if any.
    pub fn cursor(&self, feed_key: &str) -> Result<Option<PointId>> {
        self.ensure_open()?;
        Ok(self.data.cursor(feed_key))
    }

    pub fn reset_cursor(&self, feed_key: &str) -> Result<()> {
        self.begin()?;
        self.data.reset_cursor(feed_key);
        Ok(())
    }

    /// Close the store. Subsequent operations fail with `Unavailable`.
    pub fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        self.ensure_open()?;
        let mut stats = self.backend.stats()?;
        stats.operations_count = self.ops_count.load(Ordering::Relaxed);
        Ok(stats)
    }
}
