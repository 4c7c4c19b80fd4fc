//! Daemon configuration loaded from environment variables.

use crate::{ConfigError, DeletePolicy, Result};
use chrono::TimeDelta;
use std::time::Duration;
use url::Url;

/// Base URL of the qBittorrent WebUI.
pub const ENV_QBITTORRENT_URL: &str = "QBITTORRENT_URL";
/// WebUI username.
pub const ENV_QBITTORRENT_USERNAME: &str = "QBITTORRENT_USERNAME";
/// WebUI password.
pub const ENV_QBITTORRENT_PASSWORD: &str = "QBITTORRENT_PASSWORD";
/// Minutes a torrent may stay completed before it is deleted.
pub const ENV_DELETE_AFTER_MINUTES: &str = "DELETE_AFTER_MINUTES";
/// Seconds between poll cycles.
pub const ENV_POLL_INTERVAL_SECONDS: &str = "POLL_INTERVAL_SECONDS";
/// Per-request HTTP timeout in seconds.
pub const ENV_REQUEST_TIMEOUT_SECONDS: &str = "REQUEST_TIMEOUT_SECONDS";
/// Failed-deletion policy, see [`DeletePolicy`].
pub const ENV_DELETE_POLICY: &str = "DELETE_POLICY";
/// Whether to drop tracking entries for torrents missing from a snapshot.
pub const ENV_PRUNE_VANISHED: &str = "PRUNE_VANISHED";

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Validated daemon configuration.
///
/// Built once at startup and immutable afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    qbittorrent_url: String,
    username: String,
    password: String,
    delete_after_minutes: u64,
    poll_interval_secs: u64,
    request_timeout_secs: u64,
    delete_policy: DeletePolicy,
    prune_vanished: bool,
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any variable
    /// fails to parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. Errors are reported in a fixed
    /// order: the deletion threshold, then the poll interval, then every
    /// missing connection variable at once.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any variable
    /// fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());

        let delete_after_minutes = required_u64(ENV_DELETE_AFTER_MINUTES, get(ENV_DELETE_AFTER_MINUTES))?;
        if TimeDelta::try_minutes(i64::try_from(delete_after_minutes).unwrap_or(i64::MAX)).is_none() {
            return Err(ConfigError::invalid(
                ENV_DELETE_AFTER_MINUTES,
                delete_after_minutes.to_string(),
                "value is too large",
            ));
        }

        let poll_interval_secs = required_u64(ENV_POLL_INTERVAL_SECONDS, get(ENV_POLL_INTERVAL_SECONDS))?;
        if poll_interval_secs == 0 {
            return Err(ConfigError::invalid(
                ENV_POLL_INTERVAL_SECONDS,
                "0",
                "must be greater than zero",
            ));
        }

        let url = get(ENV_QBITTORRENT_URL);
        let username = get(ENV_QBITTORRENT_USERNAME);
        let password = get(ENV_QBITTORRENT_PASSWORD);

        let missing: Vec<&'static str> = [
            (ENV_QBITTORRENT_URL, url.is_none()),
            (ENV_QBITTORRENT_USERNAME, username.is_none()),
            (ENV_QBITTORRENT_PASSWORD, password.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(url), Some(username), Some(password)) = (url, username, password) else {
            return Err(ConfigError::MissingMany(missing));
        };

        let qbittorrent_url = parse_base_url(&url)?;

        let request_timeout_secs = match get(ENV_REQUEST_TIMEOUT_SECONDS) {
            Some(raw) => {
                let secs = parse_u64(ENV_REQUEST_TIMEOUT_SECONDS, &raw)?;
                if secs == 0 {
                    return Err(ConfigError::invalid(
                        ENV_REQUEST_TIMEOUT_SECONDS,
                        raw,
                        "must be greater than zero",
                    ));
                }
                secs
            }
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let delete_policy = match get(ENV_DELETE_POLICY) {
            Some(raw) => raw.parse()?,
            None => DeletePolicy::default(),
        };

        let prune_vanished = match get(ENV_PRUNE_VANISHED) {
            Some(raw) => parse_bool(ENV_PRUNE_VANISHED, &raw)?,
            None => false,
        };

        Ok(Self {
            qbittorrent_url,
            username,
            password,
            delete_after_minutes,
            poll_interval_secs,
            request_timeout_secs,
            delete_policy,
            prune_vanished,
        })
    }

    /// Returns the WebUI base URL, without a trailing slash.
    #[must_use]
    pub fn qbittorrent_url(&self) -> &str {
        &self.qbittorrent_url
    }

    /// Returns the WebUI username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the WebUI password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the configured threshold in minutes.
    #[must_use]
    pub const fn delete_after_minutes(&self) -> u64 {
        self.delete_after_minutes
    }

    /// Returns how long a torrent may stay completed before it is deleted.
    #[must_use]
    pub fn deletion_threshold(&self) -> TimeDelta {
        // Range checked in `from_lookup`.
        i64::try_from(self.delete_after_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Returns the time between poll cycles.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Returns the per-request HTTP timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the failed-deletion policy.
    #[must_use]
    pub const fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Returns true if entries for torrents missing from a snapshot are dropped.
    #[must_use]
    pub const fn prune_vanished(&self) -> bool {
        self.prune_vanished
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("qbittorrent_url", &self.qbittorrent_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("delete_after_minutes", &self.delete_after_minutes)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("delete_policy", &self.delete_policy)
            .field("prune_vanished", &self.prune_vanished)
            .finish()
    }
}

fn required_u64(variable: &'static str, raw: Option<String>) -> Result<u64> {
    let raw = raw.ok_or(ConfigError::Missing(variable))?;
    parse_u64(variable, &raw)
}

fn parse_u64(variable: &'static str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::invalid(variable, raw, e))
}

fn parse_bool(variable: &'static str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(variable, raw, "expected a boolean")),
    }
}

fn parse_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::invalid(ENV_QBITTORRENT_URL, raw, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            ENV_QBITTORRENT_URL,
            raw,
            "scheme must be http or https",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (ENV_QBITTORRENT_URL, "http://localhost:8080/".to_string()),
            (ENV_QBITTORRENT_USERNAME, "admin".to_string()),
            (ENV_QBITTORRENT_PASSWORD, "adminadmin".to_string()),
            (ENV_DELETE_AFTER_MINUTES, "30".to_string()),
            (ENV_POLL_INTERVAL_SECONDS, "60".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<Config> {
        Config::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_load_minimal() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.qbittorrent_url(), "http://localhost:8080");
        assert_eq!(config.username(), "admin");
        assert_eq!(config.password(), "adminadmin");
        assert_eq!(config.deletion_threshold(), TimeDelta::minutes(30));
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(config.delete_policy(), DeletePolicy::FireAndForget);
        assert!(!config.prune_vanished());
    }

    #[test]
    fn test_load_optional_values() {
        let mut env = base_env();
        env.insert(ENV_REQUEST_TIMEOUT_SECONDS, "5".to_string());
        env.insert(ENV_DELETE_POLICY, "retry".to_string());
        env.insert(ENV_PRUNE_VANISHED, "yes".to_string());

        let config = load(&env).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.delete_policy(), DeletePolicy::Retry);
        assert!(config.prune_vanished());
    }

    #[test]
    fn test_zero_threshold_allowed() {
        let mut env = base_env();
        env.insert(ENV_DELETE_AFTER_MINUTES, "0".to_string());
        let config = load(&env).unwrap();
        assert_eq!(config.deletion_threshold(), TimeDelta::zero());
    }

    #[test]
    fn test_missing_threshold_reported_first() {
        let env = HashMap::new();
        assert_eq!(
            load(&env).unwrap_err(),
            ConfigError::Missing(ENV_DELETE_AFTER_MINUTES)
        );
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut env = base_env();
        env.insert(ENV_DELETE_AFTER_MINUTES, "-5".to_string());
        let err = load(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { variable: ENV_DELETE_AFTER_MINUTES, .. }
        ));
    }

    #[test]
    fn test_missing_interval() {
        let mut env = base_env();
        env.remove(ENV_POLL_INTERVAL_SECONDS);
        assert_eq!(
            load(&env).unwrap_err(),
            ConfigError::Missing(ENV_POLL_INTERVAL_SECONDS)
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut env = base_env();
        env.insert(ENV_POLL_INTERVAL_SECONDS, "0".to_string());
        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::Invalid { variable: ENV_POLL_INTERVAL_SECONDS, .. }
        ));
    }

    #[test]
    fn test_missing_connection_variables_listed_together() {
        let mut env = base_env();
        env.remove(ENV_QBITTORRENT_URL);
        env.insert(ENV_QBITTORRENT_PASSWORD, "   ".to_string());

        let err = load(&env).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingMany(vec![ENV_QBITTORRENT_URL, ENV_QBITTORRENT_PASSWORD])
        );
        assert_eq!(
            err.to_string(),
            "missing required environment variables: QBITTORRENT_URL, QBITTORRENT_PASSWORD"
        );
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut env = base_env();
        env.insert(ENV_QBITTORRENT_URL, "ftp://example.com".to_string());
        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::Invalid { variable: ENV_QBITTORRENT_URL, .. }
        ));

        env.insert(ENV_QBITTORRENT_URL, "not a url".to_string());
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_bad_optional_values_rejected() {
        let mut env = base_env();
        env.insert(ENV_PRUNE_VANISHED, "maybe".to_string());
        assert!(load(&env).is_err());

        let mut env = base_env();
        env.insert(ENV_REQUEST_TIMEOUT_SECONDS, "0".to_string());
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = load(&base_env()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("adminadmin"));
        assert!(debug.contains("<redacted>"));
    }
}
