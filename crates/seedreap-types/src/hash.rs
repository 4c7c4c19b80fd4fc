//! Torrent identifiers.

use serde::{Deserialize, Serialize};

/// Opaque torrent identifier, as reported by the download client.
///
/// qBittorrent reports the v1 info hash (or the truncated v2 hash for hybrid
/// torrents) as lowercase hex. The value is never interpreted, only compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TorrentHash(String);

impl TorrentHash {
    /// Creates a hash from any string-like value without validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a shortened form for display (first 8 characters).
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl AsRef<str> for TorrentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TorrentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
