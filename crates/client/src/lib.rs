//! feedstore client
//!
//! Native Rust client for a feedstore server.
//!
//! - [`FeedClient`]: async RPC client exposing the storage primitives
//! - [`RemoteBackend`]: blocking `FeedBackend` so a local `FeedStore`
//!   (with its own stream cursors) can run on top of a shared server
//!
//! # Example
//!
//! ```ignore
//! use feedstore::FeedStore;
//! use feedstore_client::{ClientConfig, RemoteBackend};
//!
//! let backend = RemoteBackend::connect(&ClientConfig::new(addr))?;
//! let store = FeedStore::builder().backend(Arc::new(backend)).build()?;
//! store.append("beta-test-123456", "42.0")?;
//! ```

pub mod config;
pub mod transport;

pub use config::ClientConfig;
pub use transport::blocking::RemoteBackend;
pub use transport::rpc::{ClientError, FeedClient, Result};
