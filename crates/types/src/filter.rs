//! Time-window filters for listing points.

use crate::point::DataPoint;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Restricts a listing to points created inside a time window.
///
/// Both bounds are inclusive. An empty filter matches every point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFilter {
    pub start_time: Option<SystemTime>,
    pub end_time: Option<SystemTime>,
}

impl DataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points created at or after `start`.
    pub fn since(start: SystemTime) -> Self {
        Self {
            start_time: Some(start),
            end_time: None,
        }
    }

    /// Points created at or after a Unix timestamp in seconds.
    pub fn since_unix(secs: u64) -> Self {
        Self::since(UNIX_EPOCH + Duration::from_secs(secs))
    }

    pub fn until(mut self, end: SystemTime) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }

    pub fn matches(&self, point: &DataPoint) -> bool {
        if let Some(start) = self.start_time
            && point.created_at < start
        {
            return false;
        }
        if let Some(end) = self.end_time
            && point.created_at > end
        {
            return false;
        }
        true
    }
}
