//! Time-series feed store with point lifecycle, filtered listing and stream cursors.
//!
//! ## Features
//! - **Feed registry**: lookup by key, explicit creation, on-demand placeholders
//! - **Data points**: append, get, update, delete; values kept as text
//! - **Listing**: newest first, optionally restricted to a time window
//! - **Stream cursors**: `last`/`first`/`prev`/`next` per feed
//! - **Pluggable storage**: in-memory backend or any `FeedBackend` (e.g. a remote service)
//!
//! ## Cursor Behavior
//! - `last()`/`first()` position the feed's cursor at the newest/oldest point
//! - `prev()`/`next()` step one point in stream order and fail with
//!   `InvalidState` when no position is set
//! - At either end of the stream they fail with `NotFound` and the cursor stays put
//! - Deleting the point under the cursor unsets it
//!
//! ```rust
//! use feedstore::{DataFilter, FeedStore};
//!
//! let store = FeedStore::memory()?;
//! store.ensure_feed("beta-test-123456")?;
//!
//! let point = store.append("beta-test-123456", "42.0")?;
//! store.update("beta-test-123456", point.id, "43.5")?;
//!
//! store.append("beta-test-123456", "1.0")?;
//! let newest = store.last("beta-test-123456")?;
//! let older = store.prev("beta-test-123456")?;
//! assert_eq!(older.id, point.id);
//! assert_eq!(store.next("beta-test-123456")?.id, newest.id);
//!
//! let recent = store.list("beta-test-123456", Some(&DataFilter::since(older.created_at)))?;
//! assert_eq!(recent.len(), 2);
//! # Ok::<(), feedstore::StoreError>(())
//! ```

pub mod builder;
pub mod config;
pub mod db;
pub mod error;
pub mod storage;

pub use builder::FeedStoreBuilder;
pub use db::{Cursor, DataStore, FeedRegistry, FeedStore};
pub use error::{Result, StoreError};

pub use config::{
    AppendOptions, Config, DataFilter, DataPoint, Direction, Feed, PointId, StoreStats,
};

pub use storage::{FeedBackend, MemoryBackend};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{FeedStore, FeedStoreBuilder, Result, StoreError};

    pub use crate::{DataStore, FeedRegistry};

    pub use crate::{AppendOptions, Config, DataFilter, DataPoint, Feed, PointId};

    pub use crate::{FeedBackend, MemoryBackend};

    pub use std::time::Duration;
}
