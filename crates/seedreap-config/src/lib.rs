//! Environment configuration for the seedreap torrent auto-delete daemon.
//!
//! - [`Config`] - Validated daemon configuration
//! - [`ConfigError`] - Why a configuration could not be loaded
//! - [`DeletePolicy`] - What happens to a tracking entry when a delete fails

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seedreap/seedreap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod policy;

pub use config::{
    Config, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_DELETE_AFTER_MINUTES, ENV_DELETE_POLICY,
    ENV_POLL_INTERVAL_SECONDS, ENV_PRUNE_VANISHED, ENV_QBITTORRENT_PASSWORD, ENV_QBITTORRENT_URL,
    ENV_QBITTORRENT_USERNAME, ENV_REQUEST_TIMEOUT_SECONDS,
};
pub use error::{ConfigError, Result};
pub use policy::DeletePolicy;
