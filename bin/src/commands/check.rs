//! Check command implementation.
//!
//! Validates configuration and connectivity without deleting anything.

use super::{connect, load_config};
use crate::display::format_minutes;
use anyhow::{Context, Result};

/// Validate configuration, log in, fetch one snapshot and print a summary.
pub(crate) async fn check() -> Result<()> {
    let config = load_config()?;
    println!("Configuration OK");
    println!("  URL:              {}", config.qbittorrent_url());
    println!("  User:             {}", config.username());
    println!(
        "  Delete after:     {}",
        format_minutes(config.delete_after_minutes())
    );
    println!("  Poll interval:    {}s", config.poll_interval().as_secs());
    println!("  Request timeout:  {}s", config.request_timeout().as_secs());
    println!("  Delete policy:    {}", config.delete_policy());
    println!("  Prune vanished:   {}", config.prune_vanished());

    let client = connect(&config).await?;
    println!("Login OK");

    let snapshot = client.torrents().await.context("Error getting torrents")?;
    let completed = snapshot.iter().filter(|t| t.is_completed()).count();
    println!(
        "Snapshot OK: {} torrents, {} in a completed state",
        snapshot.len(),
        completed
    );
    Ok(())
}
