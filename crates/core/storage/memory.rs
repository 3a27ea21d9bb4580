//! In-memory storage backend implementation.

use super::FeedBackend;
use crate::config::{AppendOptions, DataFilter, DataPoint, Direction, Feed, PointId, StoreStats};
use crate::error::{Result, StoreError};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::ops::Bound;
use std::time::SystemTime;

/// Points of one feed, indexed by id and by stream position.
struct FeedSlot {
    feed: Feed,
    points: FxHashMap<PointId, DataPoint>,
    /// Total order of the feed: (created_at, id), oldest first
    order: BTreeSet<(SystemTime, PointId)>,
    next_id: PointId,
}

impl FeedSlot {
    fn new(feed: Feed) -> Self {
        Self {
            feed,
            points: FxHashMap::default(),
            order: BTreeSet::new(),
            next_id: 1,
        }
    }

    fn push(&mut self, value: &str, created_at: SystemTime) -> DataPoint {
        let id = self.next_id;
        self.next_id += 1;

        let point = DataPoint::new(id, self.feed.key.clone(), value, created_at);
        self.order.insert(point.stream_key());
        self.points.insert(id, point.clone());
        point
    }

    /// Newest creation time in the feed
    fn latest_created_at(&self) -> Option<SystemTime> {
        self.order.last().map(|(ts, _)| *ts)
    }

    fn point(&self, id: PointId) -> Result<&DataPoint> {
        self.points
            .get(&id)
            .ok_or_else(|| StoreError::point_not_found(&self.feed.key, id))
    }

    fn resolve(&self, key: Option<&(SystemTime, PointId)>) -> Option<DataPoint> {
        key.and_then(|(_, id)| self.points.get(id)).cloned()
    }
}

/// In-memory storage backend using DashMap
///
/// Each feed lives in its own map entry, so writers to different feeds do not
/// contend. Id assignment happens under the entry's exclusive lock.
pub struct MemoryBackend {
    feeds: DashMap<String, FeedSlot>,
}

impl MemoryBackend {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            feeds: DashMap::new(),
        }
    }

    /// Create with initial capacity hint (number of feeds)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            feeds: DashMap::with_capacity(capacity),
        }
    }

    /// Number of feeds
    pub fn feed_count(&self) -> usize {
        self.feeds.len()
    }

    /// Remove all feeds and points
    pub fn clear(&self) {
        self.feeds.clear();
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedBackend for MemoryBackend {
    fn create_feed(&self, feed: Feed) -> Result<Feed> {
        match self.feeds.entry(feed.key.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(format!("feed '{}'", feed.key))),
            Entry::Vacant(entry) => {
                entry.insert(FeedSlot::new(feed.clone()));
                Ok(feed)
            }
        }
    }

    fn get_feed(&self, key: &str) -> Result<Feed> {
        self.feeds
            .get(key)
            .map(|slot| slot.feed.clone())
            .ok_or_else(|| StoreError::feed_not_found(key))
    }

    fn get_or_create_feed(&self, key: &str) -> Result<Feed> {
        let slot = self
            .feeds
            .entry(key.to_string())
            .or_insert_with(|| FeedSlot::new(Feed::placeholder(key)));
        Ok(slot.feed.clone())
    }

    fn create_point(&self, feed_key: &str, value: &str, opts: &AppendOptions) -> Result<DataPoint> {
        let mut slot = self
            .feeds
            .get_mut(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        let created_at = opts.effective_timestamp_after(slot.latest_created_at());
        Ok(slot.push(value, created_at))
    }

    fn create_points(&self, feed_key: &str, values: &[String]) -> Result<Vec<DataPoint>> {
        let mut slot = self
            .feeds
            .get_mut(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        let now = AppendOptions::default().effective_timestamp_after(slot.latest_created_at());
        Ok(values.iter().map(|value| slot.push(value, now)).collect())
    }

    fn get_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        let slot = self
            .feeds
            .get(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        slot.point(id).cloned()
    }

    fn update_point(&self, feed_key: &str, id: PointId, value: &str) -> Result<DataPoint> {
        let mut slot = self
            .feeds
            .get_mut(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        let point = slot
            .points
            .get_mut(&id)
            .ok_or_else(|| StoreError::point_not_found(feed_key, id))?;
        point.value = value.to_string();
        Ok(point.clone())
    }

    fn delete_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        let mut slot = self
            .feeds
            .get_mut(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        let point = slot
            .points
            .remove(&id)
            .ok_or_else(|| StoreError::point_not_found(feed_key, id))?;
        slot.order.remove(&point.stream_key());
        Ok(point)
    }

    fn list_points(&self, feed_key: &str, filter: &DataFilter) -> Result<Vec<DataPoint>> {
        let slot = self
            .feeds
            .get(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;

        if let (Some(start), Some(end)) = (filter.start_time, filter.end_time)
            && start > end
        {
            return Ok(Vec::new());
        }

        let lower = filter
            .start_time
            .map_or(Bound::Unbounded, |t| Bound::Included((t, PointId::MIN)));
        let upper = filter
            .end_time
            .map_or(Bound::Unbounded, |t| Bound::Included((t, PointId::MAX)));

        Ok(slot
            .order
            .range((lower, upper))
            .rev()
            .filter_map(|(_, id)| slot.points.get(id))
            .cloned()
            .collect())
    }

    fn latest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
        let slot = self
            .feeds
            .get(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        Ok(slot.resolve(slot.order.last()))
    }

    fn earliest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
        let slot = self
            .feeds
            .get(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        Ok(slot.resolve(slot.order.first()))
    }

    fn adjacent_point(
        &self,
        feed_key: &str,
        id: PointId,
        direction: Direction,
    ) -> Result<Option<DataPoint>> {
        let slot = self
            .feeds
            .get(feed_key)
            .ok_or_else(|| StoreError::feed_not_found(feed_key))?;
        let anchor = slot.point(id)?.stream_key();

        let neighbor = match direction {
            Direction::Older => slot.order.range(..anchor).next_back(),
            Direction::Newer => slot
                .order
                .range((Bound::Excluded(anchor), Bound::Unbounded))
                .next(),
        };
        Ok(slot.resolve(neighbor))
    }

    fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            feed_count: self.feeds.len(),
            point_count: self.feeds.iter().map(|slot| slot.points.len()).sum(),
            operations_count: 0,
        })
    }
}
