//! The poll loop.
//!
//! Each cycle fetches a snapshot, feeds it to the [`LifecycleTracker`] and
//! dispatches the resulting deletions one after the other. A failed fetch
//! leaves the tracking table untouched; a failed deletion never aborts the
//! cycle.

use crate::{SnapshotFetcher, TorrentRemover};
use chrono::{DateTime, Utc};
use seedreap_config::{Config, DeletePolicy};
use seedreap_tracker::{DeletionAction, LifecycleTracker};
use seedreap_types::Snapshot;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Settings for the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaperOptions {
    /// Pause between the end of one cycle and the start of the next.
    pub poll_interval: Duration,
    /// What to do with a tracking entry when its deletion fails.
    pub delete_policy: DeletePolicy,
    /// Drop entries for torrents missing from the snapshot.
    pub prune_vanished: bool,
    /// Log deletions instead of performing them.
    pub dry_run: bool,
}

impl ReaperOptions {
    /// Builds loop settings from the daemon configuration.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            delete_policy: config.delete_policy(),
            prune_vanished: config.prune_vanished(),
            dry_run: false,
        }
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What one successful cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Torrents in the snapshot.
    pub seen: usize,
    /// Torrents in the snapshot in a completed state.
    pub completed: usize,
    /// Entries in the tracking table after the cycle.
    pub tracked: usize,
    /// Torrents whose grace period started.
    pub newly_tracked: usize,
    /// Torrents forgotten because they stopped seeding.
    pub untracked: usize,
    /// Deletions that succeeded (or were logged, in dry-run mode).
    pub deleted: usize,
    /// Deletions the remover reported as failed.
    pub failed_deletions: usize,
    /// Entries dropped because their torrent vanished from the snapshot.
    pub pruned: usize,
}

/// Drives the lifecycle tracker against a download client.
///
/// Owns the tracker exclusively; all state changes happen on the task that
/// runs [`run`](Self::run).
#[derive(Debug)]
pub struct Reaper<F, R> {
    fetcher: F,
    remover: R,
    tracker: LifecycleTracker,
    options: ReaperOptions,
}

impl<F, R> Reaper<F, R>
where
    F: SnapshotFetcher,
    R: TorrentRemover,
{
    /// Creates a new driver.
    #[must_use]
    pub const fn new(fetcher: F, remover: R, tracker: LifecycleTracker, options: ReaperOptions) -> Self {
        Self {
            fetcher,
            remover,
            tracker,
            options,
        }
    }

    /// Returns the tracker.
    #[must_use]
    pub const fn tracker(&self) -> &LifecycleTracker {
        &self.tracker
    }

    /// Returns the loop settings.
    #[must_use]
    pub const fn options(&self) -> &ReaperOptions {
        &self.options
    }

    /// Runs cycles until `shutdown` turns `true` or its sender is dropped.
    ///
    /// The first cycle starts immediately; each later one starts a full poll
    /// interval after the previous one ended, whether it succeeded or not.
    /// Shutdown is observed between cycles; a cycle in progress always finishes.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let interval_secs = self.options.poll_interval.as_secs();
        info!(
            threshold_minutes = self.tracker.threshold().num_minutes(),
            interval_secs,
            policy = %self.options.delete_policy,
            dry_run = self.options.dry_run,
            "starting qBittorrent auto-delete loop"
        );

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            match self.run_cycle().await {
                Ok(summary) => {
                    info!(
                        seen = summary.seen,
                        completed = summary.completed,
                        tracked = summary.tracked,
                        deleted = summary.deleted,
                        failed = summary.failed_deletions,
                        "completed checking torrents, sleeping for {interval_secs} seconds"
                    );
                }
                Err(e) => {
                    warn!(error = %e, "error getting torrents, retrying in {interval_secs} seconds");
                }
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.options.poll_interval) => {}
            }
        }

        info!(tracked = self.tracker.table().len(), "auto-delete loop stopped");
    }

    /// Runs one cycle, reading the wall clock once the snapshot has arrived.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error; the tracking table is unchanged in that case.
    pub async fn run_cycle(&mut self) -> Result<CycleSummary, F::Error> {
        self.run_cycle_with(Utc::now).await
    }

    /// Runs one cycle, calling `clock` after a successful fetch to get the
    /// observation time.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error; `clock` is not called and the tracking
    /// table is unchanged in that case.
    pub async fn run_cycle_with<C>(&mut self, clock: C) -> Result<CycleSummary, F::Error>
    where
        C: FnOnce() -> DateTime<Utc> + Send,
    {
        let snapshot = self.fetcher.fetch_snapshot().await?;
        let now = clock();
        Ok(self.process(&snapshot, now).await)
    }

    /// Feeds one snapshot observed at `now` to the tracker and dispatches the
    /// resulting deletions.
    async fn process(&mut self, snapshot: &Snapshot, now: DateTime<Utc>) -> CycleSummary {
        let report = self.tracker.observe(snapshot, now);
        for (id, name) in &report.newly_tracked {
            info!(hash = %id, name = %name, "tracking new seeding torrent");
        }
        for id in &report.untracked {
            debug!(hash = %id, "torrent no longer seeding, untracked");
        }

        let pruned = if self.options.prune_vanished {
            let dropped = self.tracker.retain_present(snapshot);
            for id in &dropped {
                debug!(hash = %id, "torrent vanished from snapshot, untracked");
            }
            dropped.len()
        } else {
            0
        };

        let mut summary = CycleSummary {
            seen: report.seen,
            completed: report.completed,
            newly_tracked: report.newly_tracked.len(),
            untracked: report.untracked.len(),
            pruned,
            ..CycleSummary::default()
        };

        for action in &report.deletions {
            if self.dispatch(action, now).await {
                summary.deleted += 1;
            } else {
                summary.failed_deletions += 1;
            }
        }

        summary.tracked = self.tracker.table().len();
        summary
    }

    /// Issues one deletion. Returns false if the remover failed.
    async fn dispatch(&mut self, action: &DeletionAction, now: DateTime<Utc>) -> bool {
        let seeded_for = now - action.tracked_since;
        info!(
            hash = %action.id,
            name = %action.name,
            seeded_minutes = seeded_for.num_minutes(),
            "deleting seeding torrent"
        );

        if self.options.dry_run {
            info!(hash = %action.id, name = %action.name, "dry run, torrent left in place");
            return true;
        }

        match self.remover.delete_torrent(&action.id, &action.name).await {
            Ok(()) => {
                info!(hash = %action.id, name = %action.name, "deleted torrent");
                true
            }
            Err(e) => {
                warn!(hash = %action.id, name = %action.name, error = %e, "error deleting torrent");
                if self.options.delete_policy == DeletePolicy::Retry {
                    self.tracker.restore(action);
                }
                false
            }
        }
    }
}
