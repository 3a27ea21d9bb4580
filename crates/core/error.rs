//! Error taxonomy for feedstore.
//!
//! Every operation surfaces exactly one of these kinds. Callers branch on the
//! kind, never on the message text.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum StoreError {
    /// Referenced feed or point does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Feed key collision on explicit create
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Cursor navigation without a valid position
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying storage or transport failure
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn feed_not_found(feed_key: &str) -> Self {
        Self::NotFound(format!("feed '{}'", feed_key))
    }

    pub fn point_not_found(feed_key: &str, id: u64) -> Self {
        Self::NotFound(format!("point {} in feed '{}'", id, feed_key))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Unavailable(format!("I/O error: {}", e))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Unavailable(format!("Serialization error: {}", e))
    }
}
