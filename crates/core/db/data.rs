//! Data store: point lifecycle and stream navigation for feeds.

use super::cursor::{Cursor, CursorTable};
use super::registry::FeedRegistry;
use crate::config::{AppendOptions, Config, DataFilter, DataPoint, Direction, PointId};
use crate::error::{Result, StoreError};
use crate::storage::FeedBackend;
use std::sync::Arc;

/// Owns the ordered points of each feed and the per-feed cursors used by
/// `last`/`first`/`prev`/`next`.
///
/// Cursors are session state: two `DataStore`s over the same backend
/// navigate independently.
pub struct DataStore {
    backend: Arc<dyn FeedBackend>,
    registry: FeedRegistry,
    cursors: CursorTable,
    config: Config,
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DataStore {
    pub fn new(backend: Arc<dyn FeedBackend>, config: Config) -> Self {
        Self {
            registry: FeedRegistry::new(Arc::clone(&backend)),
            backend,
            cursors: CursorTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append a value to a feed, creating the feed if needed (unless
    /// `auto_create_feeds` is disabled).
    pub fn append(&self, feed_key: &str, value: &str) -> Result<DataPoint> {
        self.append_with(feed_key, value, AppendOptions::default())
    }

    /// Append with explicit options.
    pub fn append_with(
        &self,
        feed_key: &str,
        value: &str,
        opts: AppendOptions,
    ) -> Result<DataPoint> {
        if self.config.auto_create_feeds {
            self.registry.ensure(feed_key)?;
        }
        let point = self.backend.create_point(feed_key, value, &opts)?;
        log::debug!("Appended point {} to feed '{}'", point.id, feed_key);
        Ok(point)
    }

    /// Append to an existing feed only. Fails with `NotFound` if the feed
    /// does not exist.
    pub fn create(&self, feed_key: &str, value: &str) -> Result<DataPoint> {
        let point = self
            .backend
            .create_point(feed_key, value, &AppendOptions::default())?;
        log::debug!("Created point {} in feed '{}'", point.id, feed_key);
        Ok(point)
    }

    /// Append several values in order. Ids are assigned in slice order.
    pub fn append_batch(&self, feed_key: &str, values: &[String]) -> Result<Vec<DataPoint>> {
        if self.config.auto_create_feeds {
            self.registry.ensure(feed_key)?;
        }
        let points = self.backend.create_points(feed_key, values)?;
        log::debug!("Appended {} points to feed '{}'", points.len(), feed_key);
        Ok(points)
    }

    pub fn get(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        self.backend.get_point(feed_key, id)
    }

    /// Replace the value of a point. Id and creation time never change.
    pub fn update(&self, feed_key: &str, id: PointId, value: &str) -> Result<DataPoint> {
        let point = self.backend.update_point(feed_key, id, value)?;
        log::debug!("Updated point {} in feed '{}'", id, feed_key);
        Ok(point)
    }

    /// Delete a point. A cursor positioned at it becomes unset.
    pub fn delete(&self, feed_key: &str, id: PointId) -> Result<()> {
        self.backend.delete_point(feed_key, id)?;
        if self.cursors.invalidate(feed_key, id) {
            log::debug!("Cursor of feed '{}' unset by deletion of {}", feed_key, id);
        }
        log::debug!("Deleted point {} from feed '{}'", id, feed_key);
        Ok(())
    }

    /// Points of a feed, newest first, optionally restricted to a time window.
    ///
    /// Does not touch the cursor.
    pub fn list(&self, feed_key: &str, filter: Option<&DataFilter>) -> Result<Vec<DataPoint>> {
        let filter = filter.copied().unwrap_or_default();
        let mut points = self.backend.list_points(feed_key, &filter)?;
        if let Some(max) = self.config.max_list_len {
            points.truncate(max);
        }
        Ok(points)
    }

    /// Number of points in a feed.
    pub fn len(&self, feed_key: &str) -> Result<usize> {
        Ok(self
            .backend
            .list_points(feed_key, &DataFilter::default())?
            .len())
    }

    pub fn is_empty(&self, feed_key: &str) -> Result<bool> {
        Ok(self.backend.latest_point(feed_key)?.is_none())
    }

    /// Most recent point. Moves the cursor to it.
    pub fn last(&self, feed_key: &str) -> Result<DataPoint> {
        let handle = self.cursors.handle(feed_key);
        let mut cursor = handle.lock();
        let point = self
            .backend
            .latest_point(feed_key)?
            .ok_or_else(|| StoreError::NotFound(format!("feed '{}' has no data", feed_key)))?;
        *cursor = Cursor::At(point.id);
        Ok(point)
    }

    /// Oldest point. Moves the cursor to it.
    pub fn first(&self, feed_key: &str) -> Result<DataPoint> {
        let handle = self.cursors.handle(feed_key);
        let mut cursor = handle.lock();
        let point = self
            .backend
            .earliest_point(feed_key)?
            .ok_or_else(|| StoreError::NotFound(format!("feed '{}' has no data", feed_key)))?;
        *cursor = Cursor::At(point.id);
        Ok(point)
    }

    /// Point immediately older than the cursor. Moves the cursor to it.
    pub fn prev(&self, feed_key: &str) -> Result<DataPoint> {
        self.step(feed_key, Direction::Older)
    }

    /// Point immediately newer than the cursor. Moves the cursor to it.
    pub fn next(&self, feed_key: &str) -> Result<DataPoint> {
        self.step(feed_key, Direction::Newer)
    }

    /// Current cursor position of a feed, if any.
    pub fn cursor(&self, feed_key: &str) -> Option<PointId> {
        self.cursors.peek(feed_key).position()
    }

    pub fn reset_cursor(&self, feed_key: &str) {
        *self.cursors.handle(feed_key).lock() = Cursor::Unset;
    }

    fn step(&self, feed_key: &str, direction: Direction) -> Result<DataPoint> {
        let handle = self.cursors.handle(feed_key);
        let mut cursor = handle.lock();

        let Some(id) = cursor.position() else {
            return Err(StoreError::InvalidState(format!(
                "feed '{}' has no cursor position; call last() or first() first",
                feed_key
            )));
        };

        match self.backend.adjacent_point(feed_key, id, direction) {
            Ok(Some(point)) => {
                *cursor = Cursor::At(point.id);
                Ok(point)
            }
            // The cursor stays where it is at either end of the stream
            Ok(None) => Err(StoreError::NotFound(match direction {
                Direction::Older => format!("no point older than {} in feed '{}'", id, feed_key),
                Direction::Newer => format!("no point newer than {} in feed '{}'", id, feed_key),
            })),
            Err(StoreError::NotFound(_)) => {
                // Either the feed or the anchor point is gone; only the latter is a stale cursor
                if let Err(e) = self.backend.get_feed(feed_key) {
                    if e.is_not_found() {
                        *cursor = Cursor::Unset;
                    }
                    return Err(e);
                }
                log::warn!(
                    "Cursor of feed '{}' referenced missing point {}, unsetting",
                    feed_key,
                    id
                );
                *cursor = Cursor::Unset;
                Err(StoreError::InvalidState(format!(
                    "cursor of feed '{}' referenced point {} which no longer exists",
                    feed_key, id
                )))
            }
            Err(e) => Err(e),
        }
    }
}
