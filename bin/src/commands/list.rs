//! List command implementation.
//!
//! Fetches one snapshot and prints it as a table.

use super::{connect, load_config};
use crate::display::{format_progress, format_size, truncate};
use anyhow::{Context, Result};
use seedreap_lib::prelude::*;

/// List torrents, optionally only those in a completed state.
pub(crate) async fn list_torrents(completed_only: bool) -> Result<()> {
    let config = load_config()?;
    let client = connect(&config).await?;
    let snapshot = client.torrents().await.context("Error getting torrents")?;

    let torrents: Vec<&TorrentRecord> = snapshot
        .iter()
        .filter(|t| !completed_only || t.is_completed())
        .collect();

    if torrents.is_empty() {
        println!("No torrents found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<13} {:>7} {:>10} {:>6}  {}",
        "HASH", "STATE", "DONE", "SIZE", "RATIO", "NAME"
    );
    println!("{}", "-".repeat(80));

    for torrent in &torrents {
        let marker = if torrent.is_completed() { "*" } else { " " };
        println!(
            "{:<10} {:<13} {:>7} {:>10} {:>6} {}{}",
            torrent.id.short(),
            torrent.state.as_str(),
            torrent.progress.map_or_else(|| "-".to_string(), format_progress),
            torrent.size.map_or_else(|| "-".to_string(), format_size),
            torrent.ratio.map_or_else(|| "-".to_string(), |r| format!("{r:.2}")),
            marker,
            truncate(&torrent.name, 40)
        );
    }

    let completed = torrents.iter().filter(|t| t.is_completed()).count();
    println!(
        "\nTotal: {} torrents ({} completed, marked *)",
        torrents.len(),
        completed
    );
    Ok(())
}
