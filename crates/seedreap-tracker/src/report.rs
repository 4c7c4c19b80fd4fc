//! Per-cycle tracker output.

use chrono::{DateTime, Utc};
use seedreap_types::TorrentHash;

/// A torrent the tracker decided to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionAction {
    /// Torrent identifier.
    pub id: TorrentHash,
    /// Display name, for logging.
    pub name: String,
    /// When the torrent was first observed completed.
    pub tracked_since: DateTime<Utc>,
}

/// Everything one snapshot changed in the tracking table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Torrents that must be deleted, in snapshot order.
    pub deletions: Vec<DeletionAction>,
    /// Torrents whose grace period started this cycle, with their names.
    pub newly_tracked: Vec<(TorrentHash, String)>,
    /// Tracked torrents that were seen in a non-completed state.
    pub untracked: Vec<TorrentHash>,
    /// Number of torrents in the snapshot.
    pub seen: usize,
    /// Number of torrents in the snapshot in a completed state.
    pub completed: usize,
}
