//! Protocol definitions for the feedstore RPC service
//!
//! The service mirrors the `FeedBackend` storage primitives one to one.
//! Stream cursors are session state and never cross the wire: a client
//! wraps the remote primitives in its own `FeedStore`.

use feedstore::StoreError;
use feedstore_types::{AppendOptions, DataFilter, DataPoint, Direction, Feed, PointId, StoreStats};

#[tarpc::service]
pub trait FeedService {
    async fn create_feed(feed: Feed) -> Result<Feed, StoreError>;

    async fn get_feed(key: String) -> Result<Feed, StoreError>;

    async fn get_or_create_feed(key: String) -> Result<Feed, StoreError>;

    async fn create_point(
        feed_key: String,
        value: String,
        opts: AppendOptions,
    ) -> Result<DataPoint, StoreError>;

    async fn create_points(
        feed_key: String,
        values: Vec<String>,
    ) -> Result<Vec<DataPoint>, StoreError>;

    async fn get_point(feed_key: String, id: PointId) -> Result<DataPoint, StoreError>;

    async fn update_point(
        feed_key: String,
        id: PointId,
        value: String,
    ) -> Result<DataPoint, StoreError>;

    async fn delete_point(feed_key: String, id: PointId) -> Result<DataPoint, StoreError>;

    async fn list_points(
        feed_key: String,
        filter: DataFilter,
    ) -> Result<Vec<DataPoint>, StoreError>;

    async fn latest_point(feed_key: String) -> Result<Option<DataPoint>, StoreError>;

    async fn earliest_point(feed_key: String) -> Result<Option<DataPoint>, StoreError>;

    async fn adjacent_point(
        feed_key: String,
        id: PointId,
        direction: Direction,
    ) -> Result<Option<DataPoint>, StoreError>;

    async fn stats() -> Result<StoreStats, StoreError>;
}
