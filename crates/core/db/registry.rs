//! Feed registry: resolves feed keys to feed records.

use crate::config::Feed;
use crate::error::Result;
use crate::storage::FeedBackend;
use std::sync::Arc;

/// Resolves feed keys to feeds, creating placeholders on demand.
#[derive(Clone)]
pub struct FeedRegistry {
    backend: Arc<dyn FeedBackend>,
}

impl std::fmt::Debug for FeedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRegistry").finish_non_exhaustive()
    }
}

impl FeedRegistry {
    pub fn new(backend: Arc<dyn FeedBackend>) -> Self {
        Self { backend }
    }

    /// Get a feed by key. Fails with `NotFound` if it does not exist.
    pub fn get(&self, key: &str) -> Result<Feed> {
        self.backend.get_feed(key)
    }

    /// Get a feed, creating a placeholder with no display name if it does
    /// not exist.
    ///
    /// Idempotent: concurrent callers racing on the same key all receive the
    /// same feed.
    pub fn ensure(&self, key: &str) -> Result<Feed> {
        let feed = self.backend.get_or_create_feed(key)?;
        log::debug!("Resolved feed '{}'", feed.key);
        Ok(feed)
    }

    /// Create a feed. Fails with `AlreadyExists` if the key is taken.
    pub fn create(&self, key: &str, name: Option<&str>) -> Result<Feed> {
        self.create_feed(Feed::new(key, name.map(str::to_string)))
    }

    /// Create a fully specified feed.
    pub fn create_feed(&self, feed: Feed) -> Result<Feed> {
        let feed = self.backend.create_feed(feed)?;
        log::debug!("Created feed '{}'", feed.key);
        Ok(feed)
    }

    pub fn exists(&self, key: &str) -> Result<bool> {
        match self.backend.get_feed(key) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
