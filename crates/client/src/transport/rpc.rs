//! tarpc transport for the feedstore client

use crate::config::ClientConfig;
use feedstore::StoreError;
use feedstore_server::FeedServiceClient;
use feedstore_types::{AppendOptions, DataFilter, DataPoint, Direction, Feed, PointId, StoreStats};
use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, SystemTime};
use tarpc::client::{self, RpcError};
use tarpc::context;
use tarpc::tokio_serde::formats::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
    #[error("Server error: {0}")]
    Server(#[from] StoreError),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors reported by the server keep their kind; everything the transport
/// produces is `Unavailable`.
impl From<ClientError> for StoreError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Server(inner) => inner,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Context whose deadline tells the server how long the caller waits.
fn request_context(timeout: Duration) -> context::Context {
    let mut ctx = context::current();
    ctx.deadline = SystemTime::now() + timeout;
    ctx
}

#[derive(Clone)]
pub struct FeedClient {
    client: FeedServiceClient,
    timeout: Duration,
}

impl FeedClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        Self::connect_with_config(&ClientConfig::new(addr)).await
    }

    pub async fn connect_with_config(config: &ClientConfig) -> Result<Self> {
        let timeout = config.request_timeout;
        let transport = tokio::time::timeout(
            timeout,
            tarpc::serde_transport::tcp::connect(config.endpoint, Json::default),
        )
        .await
        .map_err(|_| ClientError::Timeout(timeout))??;
        let client = FeedServiceClient::new(client::Config::default(), transport).spawn();
        Ok(Self { client, timeout })
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    fn context(&self) -> context::Context {
        request_context(self.timeout)
    }

    async fn call<T>(
        &self,
        request: impl Future<Output = std::result::Result<std::result::Result<T, StoreError>, RpcError>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(reply) => Ok(reply??),
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }

    pub async fn create_feed(&self, feed: Feed) -> Result<Feed> {
        self.call(self.client.create_feed(self.context(), feed))
            .await
    }

    pub async fn get_feed(&self, key: &str) -> Result<Feed> {
        self.call(self.client.get_feed(self.context(), key.to_string()))
            .await
    }

    pub async fn get_or_create_feed(&self, key: &str) -> Result<Feed> {
        self.call(
            self.client
                .get_or_create_feed(self.context(), key.to_string()),
        )
        .await
    }

    pub async fn create_point(
        &self,
        feed_key: &str,
        value: &str,
        opts: &AppendOptions,
    ) -> Result<DataPoint> {
        self.call(self.client.create_point(
            self.context(),
            feed_key.to_string(),
            value.to_string(),
            opts.clone(),
        ))
        .await
    }

    pub async fn create_points(&self, feed_key: &str, values: &[String]) -> Result<Vec<DataPoint>> {
        self.call(self.client.create_points(
            self.context(),
            feed_key.to_string(),
            values.to_vec(),
        ))
        .await
    }

    pub async fn get_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        self.call(
            self.client
                .get_point(self.context(), feed_key.to_string(), id),
        )
        .await
    }

    pub async fn update_point(&self, feed_key: &str, id: PointId, value: &str) -> Result<DataPoint> {
        self.call(self.client.update_point(
            self.context(),
            feed_key.to_string(),
            id,
            value.to_string(),
        ))
        .await
    }

    pub async fn delete_point(&self, feed_key: &str, id: PointId) -> Result<DataPoint> {
        self.call(
            self.client
                .delete_point(self.context(), feed_key.to_string(), id),
        )
        .await
    }

    pub async fn list_points(&self, feed_key: &str, filter: &DataFilter) -> Result<Vec<DataPoint>> {
        self.call(
            self.client
                .list_points(self.context(), feed_key.to_string(), *filter),
        )
        .await
    }

    pub async fn latest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
        self.call(
            self.client
                .latest_point(self.context(), feed_key.to_string()),
        )
        .await
    }

    pub async fn earliest_point(&self, feed_key: &str) -> Result<Option<DataPoint>> {
        self.call(
            self.client
                .earliest_point(self.context(), feed_key.to_string()),
        )
        .await
    }

    pub async fn adjacent_point(
        &self,
        feed_key: &str,
        id: PointId,
        direction: Direction,
    ) -> Result<Option<DataPoint>> {
        self.call(self.client.adjacent_point(
            self.context(),
            feed_key.to_string(),
            id,
            direction,
        ))
        .await
    }

    pub async fn stats(&self) -> Result<StoreStats> {
        self.call(self.client.stats(self.context())).await
    }
}
