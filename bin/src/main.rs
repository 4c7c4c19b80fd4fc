//! seedreap CLI - delete qBittorrent torrents once they have seeded long enough.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod display;
mod logging;

#[derive(Parser)]
#[command(name = "seedreap")]
#[command(
    about = "Delete qBittorrent torrents once they have seeded long enough",
    long_about = "Delete qBittorrent torrents once they have seeded long enough.\n\n\
                  Configuration is read from the environment: QBITTORRENT_URL, \
                  QBITTORRENT_USERNAME, QBITTORRENT_PASSWORD, DELETE_AFTER_MINUTES, \
                  POLL_INTERVAL_SECONDS and optionally REQUEST_TIMEOUT_SECONDS, \
                  DELETE_POLICY, PRUNE_VANISHED."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the auto-delete loop (default)
    Run {
        /// Log deletions instead of performing them
        #[arg(long)]
        dry_run: bool,
    },

    /// List the torrents currently known to qBittorrent
    List {
        /// Show only torrents in a completed/seeding state
        #[arg(short, long)]
        completed: bool,
    },

    /// Validate the configuration and the connection, then exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    match cli.command.unwrap_or(Commands::Run { dry_run: false }) {
        Commands::Run { dry_run } => commands::run::run(dry_run).await,
        Commands::List { completed } => commands::list::list_torrents(completed).await,
        Commands::Check => commands::check::check().await,
    }
}
