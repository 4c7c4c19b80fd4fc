//! qBittorrent WebUI client for the seedreap torrent auto-delete daemon.
//!
//! - [`api`] - WebUI endpoint URLs
//! - [`QbitClient`] - Session-aware HTTP client with retries
//! - [`ClientConfig`] - Connection settings
//! - [`ClientError`] - Why a request failed

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seedreap/seedreap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
mod client;

pub use client::{ClientConfig, ClientError, QbitClient};
