//! Torrent lifecycle tracking for the seedreap torrent auto-delete daemon.
//!
//! - [`LifecycleTracker`] - Applies the per-torrent transition rules to a snapshot
//! - [`TrackingTable`] - Torrent id to first-observed-completed timestamp
//! - [`DeletionAction`] - A torrent the tracker decided to delete
//! - [`CycleReport`] - Everything one snapshot changed

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seedreap/seedreap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod report;
mod table;
mod tracker;

pub use report::{CycleReport, DeletionAction};
pub use table::TrackingTable;
pub use tracker::LifecycleTracker;
