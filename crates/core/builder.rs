//! Store builder for flexible configuration
//!
//! This module provides a builder pattern for creating a `FeedStore` over a
//! chosen storage backend.

use crate::config::Config;
use crate::db::FeedStore;
use crate::error::Result;
use crate::storage::{FeedBackend, MemoryBackend};
use std::sync::Arc;

/// Builder for store configuration with a pluggable storage backend.
pub struct FeedStoreBuilder {
    backend: Option<Arc<dyn FeedBackend>>,
    config: Config,
}

impl FeedStoreBuilder {
    /// Create a new builder with default in-memory configuration.
    pub fn new() -> Self {
        Self {
            backend: None,
            config: Config::default(),
        }
    }

    /// Use a specific storage backend (for example a remote feed service).
    pub fn backend(mut self, backend: Arc<dyn FeedBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Configure for in-memory storage.
    pub fn in_memory(mut self) -> Self {
        self.backend = None;
        self
    }

    /// Set the store configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Disable implicit feed creation on append.
    pub fn strict_feeds(mut self) -> Self {
        self.config = self.config.clone().with_auto_create_feeds(false);
        self
    }

    /// Build the store.
    pub fn build(self) -> Result<FeedStore> {
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(MemoryBackend::new()));
        FeedStore::open(backend, self.config)
    }
}

impl Default for FeedStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FeedStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedStoreBuilder")
            .field("custom_backend", &self.backend.is_some())
            .field("config", &self.config)
            .finish()
    }
}
