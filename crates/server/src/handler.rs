//! Handler implementation for the feedstore RPC service

use crate::protocol::FeedService;
use feedstore::{FeedBackend, StoreError};
use feedstore_types::{AppendOptions, DataFilter, DataPoint, Direction, Feed, PointId, StoreStats};
use std::sync::Arc;
use tarpc::context;
use tracing::{debug, warn};

type Reply<T> = Result<T, StoreError>;

/// Serves one shared backend to every connection.
#[derive(Clone)]
pub struct Handler {
    backend: Arc<dyn FeedBackend>,
}

impl Handler {
    pub fn new(backend: Arc<dyn FeedBackend>) -> Self {
        Self { backend }
    }
}

fn logged<T>(op: &str, result: Reply<T>) -> Reply<T> {
    if let Err(e) = &result {
        match e {
            StoreError::Unavailable(_) => warn!("{} failed: {}", op, e),
            _ => debug!("{} rejected: {}", op, e),
        }
    }
    result
}

impl FeedService for Handler {
    async fn create_feed(self, _: context::Context, feed: Feed) -> Reply<Feed> {
        debug!("create_feed {}", feed.key);
        logged("create_feed", self.backend.create_feed(feed))
    }

    async fn get_feed(self, _: context::Context, key: String) -> Reply<Feed> {
        logged("get_feed", self.backend.get_feed(&key))
    }

    async fn get_or_create_feed(self, _: context::Context, key: String) -> Reply<Feed> {
        logged("get_or_create_feed", self.backend.get_or_create_feed(&key))
    }

    async fn create_point(
        self,
        _: context::Context,
        feed_key: String,
        value: String,
        opts: AppendOptions,
    ) -> Reply<DataPoint> {
        logged(
            "create_point",
            self.backend.create_point(&feed_key, &value, &opts),
        )
    }

    async fn create_points(
        self,
        _: context::Context,
        feed_key: String,
        values: Vec<String>,
    ) -> Reply<Vec<DataPoint>> {
        debug!("create_points {} x{}", feed_key, values.len());
        logged("create_points", self.backend.create_points(&feed_key, &values))
    }

    async fn get_point(self, _: context::Context, feed_key: String, id: PointId) -> Reply<DataPoint> {
        logged("get_point", self.backend.get_point(&feed_key, id))
    }

    async fn update_point(
        self,
        _: context::Context,
        feed_key: String,
        id: PointId,
        value: String,
    ) -> Reply<DataPoint> {
        logged(
            "update_point",
            self.backend.update_point(&feed_key, id, &value),
        )
    }

    async fn delete_point(
        self,
        _: context::Context,
        feed_key: String,
        id: PointId,
    ) -> Reply<DataPoint> {
        logged("delete_point", self.backend.delete_point(&feed_key, id))
    }

    async fn list_points(
        self,
        _: context::Context,
        feed_key: String,
        filter: DataFilter,
    ) -> Reply<Vec<DataPoint>> {
        // Full scans of large feeds should not stall the executor
        let backend = self.backend.clone();
        let result = tokio::task::spawn_blocking(move || backend.list_points(&feed_key, &filter))
            .await
            .unwrap_or_else(|e| Err(StoreError::Unavailable(format!("Internal error: {}", e))));
        logged("list_points", result)
    }

    async fn latest_point(self, _: context::Context, feed_key: String) -> Reply<Option<DataPoint>> {
        logged("latest_point", self.backend.latest_point(&feed_key))
    }

    async fn earliest_point(
        self,
        _: context::Context,
        feed_key: String,
    ) -> Reply<Option<DataPoint>> {
        logged("earliest_point", self.backend.earliest_point(&feed_key))
    }

    async fn adjacent_point(
        self,
        _: context::Context,
        feed_key: String,
        id: PointId,
        direction: Direction,
    ) -> Reply<Option<DataPoint>> {
        logged(
            "adjacent_point",
            self.backend.adjacent_point(&feed_key, id, direction),
        )
    }

    async fn stats(self, _: context::Context) -> Reply<StoreStats> {
        logged("stats", self.backend.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedstore::MemoryBackend;

    fn handler() -> Handler {
        Handler::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_handler_round_trip() {
        let h = handler();
        let ctx = context::current();

        h.clone()
            .create_feed(ctx, Feed::new("temp", Some("Temperature".into())))
            .await
            .unwrap();
        let p = h
            .clone()
            .create_point(ctx, "temp".into(), "21.5".into(), AppendOptions::default())
            .await
            .unwrap();
        assert_eq!(p.id, 1);

        let listed = h
            .clone()
            .list_points(ctx, "temp".into(), DataFilter::default())
            .await
            .unwrap();
        assert_eq!(listed, vec![p.clone()]);

        let latest = h.clone().latest_point(ctx, "temp".into()).await.unwrap();
        assert_eq!(latest, Some(p));
    }

    #[tokio::test]
    async fn test_handler_passes_error_kinds_through() {
        let h = handler();
        let ctx = context::current();

        let err = h.clone().get_feed(ctx, "missing".into()).await.unwrap_err();
        assert!(err.is_not_found());

        h.clone()
            .create_feed(ctx, Feed::new("dup", None))
            .await
            .unwrap();
        let err = h
            .clone()
            .create_feed(ctx, Feed::new("dup", None))
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
    }
}
