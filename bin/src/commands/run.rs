//! The auto-delete daemon.
//!
//! Loads the configuration, authenticates once, then hands control to the
//! poll loop until Ctrl-C (or SIGTERM on unix) is received.

use super::{connect, load_config};
use anyhow::Result;
use seedreap_lib::prelude::*;
use tokio::sync::watch;
use tracing::{info, warn};

/// Run the auto-delete loop until a shutdown signal arrives.
pub(crate) async fn run(dry_run: bool) -> Result<()> {
    let config = load_config()?;
    let client = connect(&config).await?;
    info!(url = config.qbittorrent_url(), "connected to qBittorrent");

    let (stop, shutdown) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("shutdown requested");
        let _ = stop.send(true);
    });

    let tracker = LifecycleTracker::new(config.deletion_threshold());
    let options = ReaperOptions::from_config(&config).with_dry_run(dry_run);
    let mut reaper = Reaper::new(client.clone(), client, tracker, options);
    reaper.run(shutdown).await;

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(e) => {
            warn!(error = %e, "cannot listen for SIGTERM");
            ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        () = ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
