//! # feedstore-types
//!
//! Core feed and data point types for the feedstore time-series service.
//!
//! This crate provides the records exchanged between the store, its storage
//! backends and remote clients:
//!
//! - **Feeds**: `Feed`, a named collection of time-ordered points
//! - **Points**: `DataPoint`, `PointId`, `Direction`
//! - **Queries**: `DataFilter` for time-windowed listing
//! - **Options**: `AppendOptions`
//! - **Statistics**: `StoreStats`
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use feedstore_types::filter::DataFilter;
//! use feedstore_types::point::DataPoint;
//! use std::time::{Duration, UNIX_EPOCH};
//!
//! let created_at = UNIX_EPOCH + Duration::from_secs(1_700_000_010);
//! let point = DataPoint::new(1, "beta-test-123456", "42.0", created_at);
//!
//! let filter = DataFilter::since_unix(1_700_000_000);
//! assert!(filter.matches(&point));
//! ```

pub mod config;
pub mod feed;
pub mod filter;
pub mod point;
pub mod stats;

pub use config::AppendOptions;
pub use feed::Feed;
pub use filter::DataFilter;
pub use point::{DataPoint, Direction, PointId};
pub use stats::StoreStats;
