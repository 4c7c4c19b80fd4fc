//! HTTP client for the qBittorrent WebUI API.

use crate::api::{
    self, LOGIN_FAILED_BODY, LOGIN_PATH, TORRENTS_DELETE_PATH, TORRENTS_INFO_PATH,
};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use seedreap_types::{SeedreapError, Snapshot, TorrentHash, TorrentRecord};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration for the WebUI client.
#[derive(Clone)]
pub struct ClientConfig {
    /// WebUI base URL, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// WebUI username.
    pub username: String,
    /// WebUI password.
    pub password: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for a failed listing request.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with default timeouts and retry settings.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            user_agent: format!("seedreap/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("base_delay_ms", &self.base_delay_ms)
            .field("max_delay_ms", &self.max_delay_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Errors that can occur while talking to the WebUI.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The login endpoint answered with a non-200 status.
    #[error("login failed, status code: {status}")]
    LoginRejected {
        /// HTTP status code.
        status: u16,
    },

    /// The WebUI rejected the username or password.
    #[error("login failed: invalid username or password")]
    InvalidCredentials,

    /// The session was refused even after logging in again.
    #[error("request forbidden after re-authentication")]
    Forbidden,

    /// Server returned an error status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The torrent list could not be decoded.
    #[error("error decoding torrents JSON: {0}")]
    Decode(#[from] SeedreapError),
}

/// qBittorrent WebUI client.
///
/// Holds the session cookie in its cookie store: call [`login`](Self::login)
/// once before anything else. Cloning shares the connection pool and session.
#[derive(Debug, Clone)]
pub struct QbitClient {
    client: Client,
    config: ClientConfig,
}

impl QbitClient {
    /// Creates a new client with the given configuration.
    ///
    /// Does not contact the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Authenticates and stores the session cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 200, or the
    /// credentials are rejected.
    pub async fn login(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .header(header::REFERER, &self.config.base_url)
            .form(&[
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::LoginRejected {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim() == LOGIN_FAILED_BODY {
            return Err(ClientError::InvalidCredentials);
        }

        debug!(url = %self.config.base_url, "authenticated with qBittorrent");
        Ok(())
    }

    /// Lists every torrent known to the client.
    ///
    /// Retries with exponential backoff on server errors, rate limiting,
    /// timeouts and connection failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails after all retries or the body
    /// cannot be decoded.
    pub async fn torrents(&self) -> Result<Snapshot, ClientError> {
        let mut attempts = 0;

        loop {
            match self
                .send_with_session(|| self.client.get(self.url(TORRENTS_INFO_PATH)))
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            warn!(status = status.as_u16(), attempt = attempts, ?delay, "retrying torrent listing");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(ClientError::ServerError {
                            status: status.as_u16(),
                        });
                    }

                    let body = Self::read_body(response).await?;
                    return Ok(TorrentRecord::parse_snapshot(&body)?);
                }
                Err(ClientError::Http(e))
                    if Self::is_retryable_error(&e) && attempts < self.config.max_retries =>
                {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(error = %e, attempt = attempts, ?delay, "retrying torrent listing");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Deletes a torrent and its downloaded files.
    ///
    /// Not retried beyond a single re-authentication.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server does not answer
    /// with a success status.
    pub async fn delete_torrent(&self, hash: &TorrentHash) -> Result<(), ClientError> {
        let response = self
            .send_with_session(|| {
                self.client
                    .post(self.url(TORRENTS_DELETE_PATH))
                    .form(&[("hashes", hash.as_str()), ("deleteFiles", "true")])
            })
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::ServerError {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    /// Sends a request, logging in again once if the session was refused.
    async fn send_with_session<F>(&self, build: F) -> Result<Response, ClientError>
    where
        F: Fn() -> RequestBuilder,
    {
        let response = build()
            .header(header::REFERER, &self.config.base_url)
            .send()
            .await?;
        if response.status() != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        warn!("qBittorrent session rejected, logging in again");
        self.login().await?;

        let response = build()
            .header(header::REFERER, &self.config.base_url)
            .send()
            .await?;
        if response.status() == StatusCode::FORBIDDEN {
            return Err(ClientError::Forbidden);
        }
        Ok(response)
    }

    async fn read_body(response: Response) -> Result<Bytes, ClientError> {
        response.error_for_status_ref()?;
        Ok(response.bytes().await?)
    }

    fn url(&self, path: &str) -> String {
        api::endpoint(&self.config.base_url, path)
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter (±25%) derived from the attempt number
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}
