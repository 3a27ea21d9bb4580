//! Data point records and stream ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::SystemTime;

/// Identifier of a data point, assigned by the store in creation order.
pub type PointId = u64;

/// A single timestamped value within a feed.
///
/// Values are kept as text so numeric readings round-trip without any
/// precision or formatting change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: PointId,
    pub feed_key: String,
    pub value: String,
    pub created_at: SystemTime,
}

impl DataPoint {
    pub fn new(
        id: PointId,
        feed_key: impl Into<String>,
        value: impl Into<String>,
        created_at: SystemTime,
    ) -> Self {
        Self {
            id,
            feed_key: feed_key.into(),
            value: value.into(),
            created_at,
        }
    }

    /// Position of this point in the feed's total order.
    #[inline]
    pub fn stream_key(&self) -> (SystemTime, PointId) {
        (self.created_at, self.id)
    }

    /// Compare two points in stream order (newest first).
    ///
    /// Ties on `created_at` are broken by descending id.
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        other.stream_key().cmp(&self.stream_key())
    }

    /// Parse the value as a float, if it is numeric.
    pub fn value_f64(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

/// A single step through a feed in stream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward earlier points (`prev`)
    Older,
    /// Toward later points (`next`)
    Newer,
}
