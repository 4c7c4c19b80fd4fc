//! qBittorrent WebUI endpoint construction.

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/v2/auth/login";

/// Path of the torrent listing endpoint.
pub const TORRENTS_INFO_PATH: &str = "/api/v2/torrents/info";

/// Path of the torrent deletion endpoint.
pub const TORRENTS_DELETE_PATH: &str = "/api/v2/torrents/delete";

/// Body qBittorrent returns on rejected credentials (with status 200).
pub const LOGIN_FAILED_BODY: &str = "Fails.";

/// Joins a WebUI base URL and an endpoint path.
///
/// # Example
///
/// ```
/// use seedreap_client::api::{endpoint, TORRENTS_INFO_PATH};
///
/// let url = endpoint("http://localhost:8080/", TORRENTS_INFO_PATH);
/// assert_eq!(url, "http://localhost:8080/api/v2/torrents/info");
/// ```
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
