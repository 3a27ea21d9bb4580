//! Storage backend abstraction for feedstore
//!
//! The registry and data store never touch storage directly. They drive a
//! `FeedBackend`, which may keep records in process memory or forward each
//! primitive to a remote feed service.

use crate::config::{AppendOptions, DataFilter, DataPoint, Direction, Feed, PointId, StoreStats};
use crate::error::{Result, StoreError};

mod memory;

pub use memory::MemoryBackend;

/// Trait for storage backend implementations
///
/// Required methods are the primitives a feed service offers. Provided
/// methods are built on top of them and may be overridden by backends that
/// can answer more directly.
///
/// Every method reports a missing feed or point as `StoreError::NotFound`
/// and any storage or transport failure as `StoreError::Unavailable`.
pub trait FeedBackend: Send + Sync {
    /// Create a feed, failing with `AlreadyExists` if the key is taken
    fn create_feed(&self, feed: Feed) -> Result<Feed>;

    /// Get a feed by key
    fn get_feed(&self, key: &str) -> Result<Feed>;

    /// Append a point to an existing feed, assigning a fresh id
    fn create_point(&self, feed_key: &str, value: &str, opts: &AppendOptions) -> Result<DataPoint>;

    /// Get a point by id
    fn get_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint>;

    /// Replace the value of a point, keeping its id and creation time
    fn update_point(&self, feed_key: &str, id: PointId, value: &str) -> Result<DataPoint>;

    /// Delete a point and return it
    fn delete_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint>;

    /// Points matching the filter, newest first
    fn list_points(&self, feed_key: &str, filter: &DataFilter) -> Result<Vec<DataPoint>>;

    /// Most recent point, or `None` if the feed is empty
    fn latest_point(&self, feed_key: &str) -> Result<Option<DataPoint>>;

    /// Get a feed, creating a placeholder if it does not exist.
    ///
    /// A concurrent creator winning the race is not an error: the feed it
    /// created is returned.
    fn get_or_create_feed(&self, key: &str) -> Result<Feed> {
        match self.get_feed(key) {
            Err(StoreError::NotFound(_)) => match self.create_feed(Feed::placeholder(key)) {
                Err(StoreError::AlreadyExists(_)) => self.get_feed(key),
                other => other,
            },
            other => other,
        }
    }

    /// Oldest point, or `None` if the feed is empty
    fn earliest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
        Ok(self.list_points(feed_key, &DataFilter::default())?.pop())
    }

    /// Neighbor of `id` one step in `direction`, or `None` at either end.
    ///
    /// Fails with `NotFound` if `id` itself is not in the feed.
    fn adjacent_point(
        &self,
        feed_key: &str,
        id: PointId,
        direction: Direction,
    ) -> Result<Option<DataPoint>> {
        let anchor = self.get_point(feed_key, id)?.stream_key();
        let points = self.list_points(feed_key, &DataFilter::default())?;
        Ok(match direction {
            Direction::Older => points.into_iter().find(|p| p.stream_key() < anchor),
            Direction::Newer => points.into_iter().rev().find(|p| p.stream_key() > anchor),
        })
    }

    /// Append several values in order
    fn create_points(&self, feed_key: &str, values: &[String]) -> Result<Vec<DataPoint>> {
        let opts = AppendOptions::default();
        values
            .iter()
            .map(|value| self.create_point(feed_key, value, &opts))
            .collect()
    }

    /// Get backend statistics
    fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// Backend implementing only the required primitives, to exercise the
    /// provided methods.
    #[derive(Default)]
    struct PrimitiveBackend {
        feeds: Mutex<Vec<Feed>>,
        points: Mutex<Vec<DataPoint>>,
    }

    impl FeedBackend for PrimitiveBackend {
        fn create_feed(&self, feed: Feed) -> Result<Feed> {
            let mut feeds = self.feeds.lock();
            if feeds.iter().any(|f| f.key == feed.key) {
                return Err(StoreError::AlreadyExists(feed.key));
            }
            feeds.push(feed.clone());
            Ok(feed)
        }

        fn get_feed(&self, key: &str) -> Result<Feed> {
            self.feeds
                .lock()
                .iter()
                .find(|f| f.key == key)
                .cloned()
                .ok_or_else(|| StoreError::feed_not_found(key))
        }

        fn create_point(
            &self,
            feed_key: &str,
            value: &str,
            opts: &AppendOptions,
        ) -> Result<DataPoint> {
            self.get_feed(feed_key)?;
            let mut points = self.points.lock();
            let point = DataPoint::new(
                points.len() as PointId + 1,
                feed_key,
                value,
                opts.effective_timestamp(),
            );
            points.push(point.clone());
            Ok(point)
        }

        fn get_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
            self.points
                .lock()
                .iter()
                .find(|p| p.feed_key == feed_key && p.id == id)
                .cloned()
                .ok_or_else(|| StoreError::point_not_found(feed_key, id))
        }

        fn update_point(&self, feed_key: &str, id: PointId, _value: &str) -> Result<DataPoint> {
            Err(StoreError::point_not_found(feed_key, id))
        }

        fn delete_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
            Err(StoreError::point_not_found(feed_key, id))
        }

        fn list_points(&self, feed_key: &str, filter: &DataFilter) -> Result<Vec<DataPoint>> {
            self.get_feed(feed_key)?;
            let mut points: Vec<_> = self
                .points
                .lock()
                .iter()
                .filter(|p| p.feed_key == feed_key && filter.matches(p))
                .cloned()
                .collect();
            points.sort_by(DataPoint::cmp_newest_first);
            Ok(points)
        }

        fn latest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
            Ok(self
                .list_points(feed_key, &DataFilter::default())?
                .into_iter()
                .next())
        }
    }

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_get_or_create_feed_is_idempotent() {
        let backend = PrimitiveBackend::default();
        let first = backend.get_or_create_feed("beta").unwrap();
        let second = backend.get_or_create_feed("beta").unwrap();
        assert_eq!(first, second);
        assert_eq!(backend.feeds.lock().len(), 1);
    }

    #[test]
    fn test_provided_navigation_follows_stream_order() {
        let backend = PrimitiveBackend::default();
        backend.get_or_create_feed("f").unwrap();
        // id 2 is back-dated before id 1
        backend
            .create_point("f", "a", &AppendOptions::with_timestamp(at(20)))
            .unwrap();
        backend
            .create_point("f", "b", &AppendOptions::with_timestamp(at(10)))
            .unwrap();
        backend
            .create_point("f", "c", &AppendOptions::with_timestamp(at(30)))
            .unwrap();

        assert_eq!(backend.earliest_point("f").unwrap().unwrap().id, 2);
        let older = backend.adjacent_point("f", 1, Direction::Older).unwrap();
        assert_eq!(older.unwrap().id, 2);
        let newer = backend.adjacent_point("f", 1, Direction::Newer).unwrap();
        assert_eq!(newer.unwrap().id, 3);
        assert!(
            backend
                .adjacent_point("f", 3, Direction::Newer)
                .unwrap()
                .is_none()
        );
        assert!(
            backend
                .adjacent_point("f", 9, Direction::Older)
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_provided_batch_appends_in_order() {
        let backend = PrimitiveBackend::default();
        backend.get_or_create_feed("f").unwrap();
        let values = vec!["1".to_string(), "2".to_string()];
        let points = backend.create_points("f", &values).unwrap();
        assert_eq!(points.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(backend.stats().unwrap(), StoreStats::default());
    }
}
