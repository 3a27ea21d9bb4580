//! feedstore server
//!
//! Exposes a `FeedBackend` over tarpc so that remote `FeedStore`s can share
//! one set of feeds.
//!
//! # Example
//!
//! ```ignore
//! use feedstore::MemoryBackend;
//! use feedstore_server::run_server;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! run_server(listener, Arc::new(MemoryBackend::new()), shutdown).await?;
//! ```

pub mod config;
pub mod handler;
pub mod protocol;
pub mod transport;

// Re-export protocol types for client usage
pub use protocol::{FeedService, FeedServiceClient};

pub use config::ServerConfig;
pub use transport::rpc::{run_server, run_server_with_config};
