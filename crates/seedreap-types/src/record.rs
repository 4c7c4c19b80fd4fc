//! Snapshot records.

use crate::{TorrentHash, TorrentState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// One poll cycle's view of the download client: every torrent it reports.
pub type Snapshot = Vec<TorrentRecord>;

/// A single torrent as reported in a snapshot.
///
/// Deserializes from a qBittorrent `/api/v2/torrents/info` entry. Only `hash`,
/// `name` and `state` are required; unknown fields are ignored. The display
/// fields are `None` when missing or malformed, so they never reject a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentRecord {
    /// Torrent identifier.
    #[serde(rename = "hash")]
    pub id: TorrentHash,
    /// Display name.
    pub name: String,
    /// Current state label.
    pub state: TorrentState,
    /// Download progress in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient")]
    pub progress: Option<f64>,
    /// Total size of the selected files, in bytes.
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<u64>,
    /// Share ratio.
    #[serde(default, deserialize_with = "lenient")]
    pub ratio: Option<f64>,
}

/// Decodes an optional field, mapping values of the wrong shape to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl TorrentRecord {
    /// Creates a record with the required fields and no display fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            id: TorrentHash::new(id),
            name: name.into(),
            state: TorrentState::new(state),
            progress: None,
            size: None,
            ratio: None,
        }
    }

    /// Returns true if the torrent is in a completed/seeding state.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Decodes a snapshot from a `/api/v2/torrents/info` JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON array of torrent objects.
    pub fn parse_snapshot(body: &[u8]) -> crate::Result<Snapshot> {
        Ok(serde_json::from_slice(body)?)
    }
}
