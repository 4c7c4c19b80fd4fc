//! Core types for the seedreap torrent auto-delete daemon.
//!
//! This crate provides the data structures shared by every seedreap crate:
//!
//! - [`TorrentHash`] - Opaque torrent identifier (the info hash)
//! - [`TorrentState`] - State label reported by the download client
//! - [`TorrentRecord`] - One torrent in a snapshot
//! - [`COMPLETED_STATES`] - The labels treated as completed/seeding

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seedreap/seedreap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod hash;
mod record;
mod state;

pub use error::{Result, SeedreapError};
pub use hash::TorrentHash;
pub use record::{Snapshot, TorrentRecord};
pub use state::{COMPLETED_STATES, TorrentState};
