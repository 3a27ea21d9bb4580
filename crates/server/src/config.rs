use serde::{Deserialize, Serialize};

/// Per-connection limits for the RPC server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Requests a single connection may have in flight; extra ones are rejected
    #[serde(default = "ServerConfig::default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Largest accepted request frame in bytes
    #[serde(default = "ServerConfig::default_max_frame_length")]
    pub max_frame_length: usize,
}

impl ServerConfig {
    const fn default_max_concurrent_requests() -> usize {
        256
    }

    const fn default_max_frame_length() -> usize {
        8 * 1024 * 1024
    }

    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit;
        self
    }

    pub fn with_max_frame_length(mut self, bytes: usize) -> Self {
        self.max_frame_length = bytes;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be greater than zero".to_string());
        }
        if self.max_frame_length == 0 {
            return Err("max_frame_length must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: Self::default_max_concurrent_requests(),
            max_frame_length: Self::default_max_frame_length(),
        }
    }
}
