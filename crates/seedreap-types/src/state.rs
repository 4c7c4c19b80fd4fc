//! Torrent state labels.

use serde::{Deserialize, Serialize};

/// State labels that mean the torrent has finished downloading.
///
/// Any label outside this set, including labels this crate has never heard
/// of, is treated as "not yet complete".
pub const COMPLETED_STATES: [&str; 5] = ["completed", "uploading", "stalledUP", "pausedUP", "queuedUP"];

/// State label reported by the download client for a torrent.
///
/// Kept as the raw label rather than an enum: qBittorrent adds states across
/// releases (`stoppedUP`, `forcedUP`, ...) and only membership in
/// [`COMPLETED_STATES`] matters here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TorrentState(String);

impl TorrentState {
    /// Creates a state from a raw label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the raw label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the label is one of [`COMPLETED_STATES`].
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        COMPLETED_STATES.contains(&self.0.as_str())
    }
}

impl From<&str> for TorrentState {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl std::fmt::Display for TorrentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
