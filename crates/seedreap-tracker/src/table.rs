//! The tracking table.

use chrono::{DateTime, Utc};
use seedreap_types::TorrentHash;
use std::collections::HashMap;

/// Map from torrent id to the time it was first observed completed.
///
/// An id is present only while the torrent has been seen completed in every
/// snapshot that reported it since insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingTable {
    entries: HashMap<TorrentHash, DateTime<Utc>>,
}

impl TrackingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns when `id` was first observed completed, if tracked.
    #[must_use]
    pub fn since(&self, id: &TorrentHash) -> Option<DateTime<Utc>> {
        self.entries.get(id).copied()
    }

    /// Returns true if `id` is tracked.
    #[must_use]
    pub fn contains(&self, id: &TorrentHash) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns the number of tracked torrents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, id: TorrentHash, since: DateTime<Utc>) {
        self.entries.insert(id, since);
    }

    pub(crate) fn remove(&mut self, id: &TorrentHash) -> Option<DateTime<Utc>> {
        self.entries.remove(id)
    }

    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&TorrentHash) -> bool,
    {
        self.entries.retain(|id, _| keep(id));
    }
}
