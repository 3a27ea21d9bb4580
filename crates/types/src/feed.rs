//! Feed records.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A named collection of time-ordered data points.
///
/// The `key` is the identity of a feed: it is unique within a store and
/// never changes once the feed exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub key: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: SystemTime,
}

impl Feed {
    /// Create a feed with a display name.
    pub fn new(key: impl Into<String>, name: Option<String>) -> Self {
        Self {
            key: key.into(),
            name,
            description: None,
            created_at: SystemTime::now(),
        }
    }

    /// The form a feed takes when it is created implicitly by sending data to it.
    pub fn placeholder(key: impl Into<String>) -> Self {
        Self::new(key, None)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Display name, falling back to the key.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}
