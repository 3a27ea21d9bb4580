use serde::{Deserialize, Serialize};

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of feeds known to the backend
    pub feed_count: usize,
    /// Number of data points across all feeds
    pub point_count: usize,
    /// Total number of operations performed
    pub operations_count: u64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_operation(&mut self) {
        self.operations_count += 1;
    }
}
