//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod list;
pub(crate) mod run;

use anyhow::{Context, Result};
use seedreap_lib::prelude::*;

/// Loads the configuration from the environment.
pub(crate) fn load_config() -> Result<Config> {
    Config::from_env().context("Config error")
}

/// Builds a client from the configuration and logs in.
pub(crate) async fn connect(config: &Config) -> Result<QbitClient> {
    let client_config =
        ClientConfig::new(config.qbittorrent_url(), config.username(), config.password())
            .with_timeout(config.request_timeout());
    let client = QbitClient::new(client_config).context("Failed to create HTTP client")?;
    client
        .login()
        .await
        .with_context(|| format!("Failed to log in to qBittorrent at {}", config.qbittorrent_url()))?;
    Ok(client)
}
