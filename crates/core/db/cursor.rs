//! Per-feed stream cursors.
//!
//! A cursor remembers which point `last`/`first`/`prev`/`next` returned most
//! recently. Cursors live in a table keyed by feed; each entry carries its
//! own mutex, so navigation on one feed is serialized while other feeds
//! proceed independently.

use crate::config::PointId;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Position of a feed's cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    /// No position yet, or the referenced point was deleted
    #[default]
    Unset,
    /// Positioned at a point
    At(PointId),
}

impl Cursor {
    pub fn position(&self) -> Option<PointId> {
        match self {
            Cursor::Unset => None,
            Cursor::At(id) => Some(*id),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Cursor::At(_))
    }
}

/// Cursor arena keyed by feed.
#[derive(Default)]
pub(crate) struct CursorTable {
    cursors: DashMap<String, Arc<Mutex<Cursor>>>,
}

impl CursorTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The lockable cursor for a feed, created unset on first use.
    ///
    /// The map guard is released before the caller locks the cursor.
    pub(crate) fn handle(&self, feed_key: &str) -> Arc<Mutex<Cursor>> {
        if let Some(cursor) = self.cursors.get(feed_key) {
            return Arc::clone(cursor.value());
        }
        Arc::clone(
            self.cursors
                .entry(feed_key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Cursor::Unset)))
                .value(),
        )
    }

    /// Current cursor of a feed without creating an entry.
    pub(crate) fn peek(&self, feed_key: &str) -> Cursor {
        self.existing(feed_key)
            .map(|cursor| *cursor.lock())
            .unwrap_or_default()
    }

    /// Unset the feed's cursor if it is positioned at `id`.
    ///
    /// Returns whether the cursor was invalidated.
    pub(crate) fn invalidate(&self, feed_key: &str, id: PointId) -> bool {
        let Some(cursor) = self.existing(feed_key) else {
            return false;
        };
        let mut cursor = cursor.lock();
        if *cursor == Cursor::At(id) {
            *cursor = Cursor::Unset;
            true
        } else {
            false
        }
    }

    fn existing(&self, feed_key: &str) -> Option<Arc<Mutex<Cursor>>> {
        self.cursors
            .get(feed_key)
            .map(|cursor| Arc::clone(cursor.value()))
    }
}
