//! Poll loop driver for the seedreap torrent auto-delete daemon.
//!
//! - [`SnapshotFetcher`] - Source of torrent snapshots
//! - [`TorrentRemover`] - Performs deletions
//! - [`Reaper`] - Runs fetch, track and delete on a fixed interval
//! - [`ReaperOptions`] - Loop settings
//! - [`CycleSummary`] - What one cycle did

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seedreap/seedreap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod collaborator;
mod reaper;

pub use collaborator::{SnapshotFetcher, TorrentRemover};
pub use reaper::{CycleSummary, Reaper, ReaperOptions};
