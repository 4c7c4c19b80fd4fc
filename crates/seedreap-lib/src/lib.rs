//! Automatically delete torrents that have been seeding for too long.
//!
//! This is a facade crate that re-exports functionality from the seedreap
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use seedreap_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = QbitClient::new(
//!         ClientConfig::new(config.qbittorrent_url(), config.username(), config.password())
//!             .with_timeout(config.request_timeout()),
//!     )?;
//!     client.login().await?;
//!
//!     let (_stop, shutdown) = tokio::sync::watch::channel(false);
//!     let tracker = LifecycleTracker::new(config.deletion_threshold());
//!     let mut reaper = Reaper::new(
//!         client.clone(),
//!         client,
//!         tracker,
//!         ReaperOptions::from_config(&config),
//!     );
//!     reaper.run(shutdown).await;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seedreap/seedreap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use seedreap_types::*;

// Re-export configuration
pub use seedreap_config::{Config, ConfigError, DeletePolicy};

// Re-export the lifecycle tracker
pub use seedreap_tracker::{CycleReport, DeletionAction, LifecycleTracker, TrackingTable};

// Re-export the WebUI client
#[cfg(feature = "client")]
pub use seedreap_client::{ClientConfig, ClientError, QbitClient, api};

// Re-export the poll loop
#[cfg(feature = "daemon")]
pub use seedreap_daemon::{CycleSummary, Reaper, ReaperOptions, SnapshotFetcher, TorrentRemover};

/// Prelude module for convenient imports.
///
/// ```
/// use seedreap_lib::prelude::*;
/// ```
pub mod prelude {
    pub use seedreap_types::{
        COMPLETED_STATES, SeedreapError, Snapshot, TorrentHash, TorrentRecord, TorrentState,
    };

    pub use seedreap_config::{Config, ConfigError, DeletePolicy};

    pub use seedreap_tracker::{CycleReport, DeletionAction, LifecycleTracker, TrackingTable};

    #[cfg(feature = "client")]
    pub use seedreap_client::{ClientConfig, ClientError, QbitClient};

    #[cfg(feature = "daemon")]
    pub use seedreap_daemon::{
        CycleSummary, Reaper, ReaperOptions, SnapshotFetcher, TorrentRemover,
    };
}
