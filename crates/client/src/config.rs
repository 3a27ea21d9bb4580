use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Connection settings for a remote feedstore server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Address of the server
    pub endpoint: SocketAddr,

    /// Upper bound on connecting and on each request
    #[serde(default = "ClientConfig::default_request_timeout")]
    pub request_timeout: Duration,
}

impl ClientConfig {
    const fn default_request_timeout() -> Duration {
        Duration::from_secs(5)
    }

    pub fn new(endpoint: SocketAddr) -> Self {
        Self {
            endpoint,
            request_timeout: Self::default_request_timeout(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
