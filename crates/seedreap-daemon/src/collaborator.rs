//! Interfaces the poll loop needs from the download client.

use async_trait::async_trait;
use seedreap_client::{ClientError, QbitClient};
use seedreap_types::{Snapshot, TorrentHash};

/// Returns every torrent the download client currently knows about.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// Error returned when no snapshot could be obtained.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches the current snapshot.
    async fn fetch_snapshot(&self) -> Result<Snapshot, Self::Error>;
}

/// Removes a torrent together with its downloaded files.
#[async_trait]
pub trait TorrentRemover: Send + Sync {
    /// Error returned when the removal request failed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Requests removal of the torrent `id`; `name` is for diagnostics only.
    async fn delete_torrent(&self, id: &TorrentHash, name: &str) -> Result<(), Self::Error>;
}

#[async_trait]
impl SnapshotFetcher for QbitClient {
    type Error = ClientError;

    async fn fetch_snapshot(&self) -> Result<Snapshot, ClientError> {
        self.torrents().await
    }
}

#[async_trait]
impl TorrentRemover for QbitClient {
    type Error = ClientError;

    async fn delete_torrent(&self, id: &TorrentHash, _name: &str) -> Result<(), ClientError> {
        QbitClient::delete_torrent(self, id).await
    }
}
