//! Synchronous `FeedBackend` over the RPC client.
//!
//! `FeedStore` is a blocking API, so the remote backend owns a small tokio
//! runtime and drives every request to completion on it. Methods must not be
//! called from inside another async runtime.

use super::rpc::{ClientError, FeedClient};
use crate::config::ClientConfig;
use feedstore::{FeedBackend, Result, StoreError};
use feedstore_types::{AppendOptions, DataFilter, DataPoint, Direction, Feed, PointId, StoreStats};
use std::future::Future;
use tokio::runtime::Runtime;

pub struct RemoteBackend {
    client: FeedClient,
    runtime: Runtime,
}

impl RemoteBackend {
    /// Connect to the server described by `config`.
    ///
    /// An unreachable server or a connect timeout yields `Unavailable`.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("feedstore-client")
            .enable_all()
            .build()?;
        let client = runtime.block_on(FeedClient::connect_with_config(config))?;
        log::debug!("Connected to feedstore server at {}", config.endpoint);
        Ok(Self { client, runtime })
    }

    fn run<T>(&self, request: impl Future<Output = std::result::Result<T, ClientError>>) -> Result<T> {
        self.runtime.block_on(request).map_err(StoreError::from)
    }
}

impl std::fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("request_timeout", &self.client.request_timeout())
            .finish_non_exhaustive()
    }
}

impl FeedBackend for RemoteBackend {
    fn create_feed(&self, feed: Feed) -> Result<Feed> {
        self.run(self.client.create_feed(feed))
    }

    fn get_feed(&self, key: &str) -> Result<Feed> {
        self.run(self.client.get_feed(key))
    }

    fn create_point(&self, feed_key: &str, value: &str, opts: &AppendOptions) -> Result<DataPoint> {
        self.run(self.client.create_point(feed_key, value, opts))
    }

    fn get_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        self.run(self.client.get_point(feed_key, id))
    }

    fn update_point(&self, feed_key: &str, id: PointId, value: &str) -> Result<DataPoint> {
        self.run(self.client.update_point(feed_key, id, value))
    }

    fn delete_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        self.run(self.client.delete_point(feed_key, id))
    }

    fn list_points(&self, feed_key: &str, filter: &DataFilter) -> Result<Vec<DataPoint>> {
        self.run(self.client.list_points(feed_key, filter))
    }

    fn latest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
        self.run(self.client.latest_point(feed_key))
    }

    // Single round trips instead of the provided list-and-scan versions

    fn get_or_create_feed(&self, key: &str) -> Result<Feed> {
        self.run(self.client.get_or_create_feed(key))
    }

    fn earliest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
        self.run(self.client.earliest_point(feed_key))
    }

    fn adjacent_point(
        &self,
        feed_key: &str,
        id: PointId,
        direction: Direction,
    ) -> Result<Option<DataPoint>> {
        self.run(self.client.adjacent_point(feed_key, id, direction))
    }

    fn create_points(&self, feed_key: &str, values: &[String]) -> Result<Vec<DataPoint>> {
        self.run(self.client.create_points(feed_key, values))
    }

    fn stats(&self) -> Result<StoreStats> {
        self.run(self.client.stats())
    }
}
