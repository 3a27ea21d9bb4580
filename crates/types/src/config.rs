use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Options for appending a data point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOptions {
    /// Creation time for the point (defaults to now if None)
    pub timestamp: Option<SystemTime>,
}

impl AppendOptions {
    pub fn with_timestamp(timestamp: SystemTime) -> Self {
        Self {
            timestamp: Some(timestamp),
        }
    }

    /// Resolve the creation time, falling back to the current clock.
    pub fn effective_timestamp(&self) -> SystemTime {
        self.timestamp.unwrap_or_else(SystemTime::now)
    }

    /// Like [`effective_timestamp`](Self::effective_timestamp), but a clock
    /// reading is never earlier than `latest`, the newest time already in the
    /// feed. Explicit timestamps are returned unchanged.
    pub fn effective_timestamp_after(&self, latest: Option<SystemTime>) -> SystemTime {
        match (self.timestamp, latest) {
            (Some(ts), _) => ts,
            (None, Some(latest)) => SystemTime::now().max(latest),
            (None, None) => SystemTime::now(),
        }
    }
}
