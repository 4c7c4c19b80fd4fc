//! The lifecycle state machine.

use crate::{CycleReport, DeletionAction, TrackingTable};
use chrono::{DateTime, TimeDelta, Utc};
use seedreap_types::{TorrentHash, TorrentRecord};
use std::collections::HashSet;

/// Outcome of evaluating one torrent against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Not completed and not tracked.
    Ignore,
    /// Not completed but tracked: forget it.
    Untrack,
    /// Completed for the first time: start the grace period.
    Track,
    /// Completed and still inside the grace period.
    Keep,
    /// Completed past the threshold.
    Delete(DateTime<Utc>),
}

/// Decides, per poll cycle, what happens to every torrent in a snapshot.
///
/// Per torrent, in snapshot order:
///
/// | state | tracked | elapsed | action |
/// |---|---|---|---|
/// | not completed | no | | nothing |
/// | not completed | yes | | untrack |
/// | completed | no | | track at `now` |
/// | completed | yes | `<= threshold` | nothing |
/// | completed | yes | `> threshold` | untrack and emit a deletion |
///
/// Torrents missing from a snapshot keep their entry unless
/// [`retain_present`](Self::retain_present) is called.
#[derive(Debug, Clone)]
pub struct LifecycleTracker {
    threshold: TimeDelta,
    table: TrackingTable,
}

impl LifecycleTracker {
    /// Creates a tracker with an empty table.
    #[must_use]
    pub fn new(threshold: TimeDelta) -> Self {
        Self::with_table(threshold, TrackingTable::new())
    }

    /// Creates a tracker that continues from an existing table.
    #[must_use]
    pub const fn with_table(threshold: TimeDelta, table: TrackingTable) -> Self {
        Self { threshold, table }
    }

    /// Returns the deletion threshold.
    #[must_use]
    pub const fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    /// Returns the tracking table.
    #[must_use]
    pub const fn table(&self) -> &TrackingTable {
        &self.table
    }

    /// Consumes the tracker, returning its table.
    #[must_use]
    pub fn into_table(self) -> TrackingTable {
        self.table
    }

    /// Applies one snapshot taken at `now`.
    ///
    /// Deleted torrents are evicted before the report is returned, so the
    /// caller's success or failure in deleting them does not feed back into
    /// the table (see [`restore`](Self::restore)).
    pub fn observe(&mut self, snapshot: &[TorrentRecord], now: DateTime<Utc>) -> CycleReport {
        let mut report = CycleReport {
            seen: snapshot.len(),
            ..CycleReport::default()
        };

        for record in snapshot {
            if record.is_completed() {
                report.completed += 1;
            }

            match self.transition(record, now) {
                Transition::Ignore | Transition::Keep => {}
                Transition::Untrack => {
                    self.table.remove(&record.id);
                    report.untracked.push(record.id.clone());
                }
                Transition::Track => {
                    self.table.insert(record.id.clone(), now);
                    report
                        .newly_tracked
                        .push((record.id.clone(), record.name.clone()));
                }
                Transition::Delete(tracked_since) => {
                    self.table.remove(&record.id);
                    report.deletions.push(DeletionAction {
                        id: record.id.clone(),
                        name: record.name.clone(),
                        tracked_since,
                    });
                }
            }
        }

        report
    }

    /// Drops entries for torrents that are not in `snapshot`.
    ///
    /// Returns the ids that were dropped.
    pub fn retain_present(&mut self, snapshot: &[TorrentRecord]) -> Vec<TorrentHash> {
        let present: HashSet<&TorrentHash> = snapshot.iter().map(|r| &r.id).collect();
        let mut dropped = Vec::new();
        self.table.retain(|id| {
            let keep = present.contains(id);
            if !keep {
                dropped.push(id.clone());
            }
            keep
        });
        dropped
    }

    /// Puts an evicted entry back with its original timestamp.
    ///
    /// Used when a deletion failed and should be attempted again next cycle.
    /// Does nothing if the id has been tracked again in the meantime.
    pub fn restore(&mut self, action: &DeletionAction) {
        if !self.table.contains(&action.id) {
            self.table.insert(action.id.clone(), action.tracked_since);
        }
    }

    fn transition(&self, record: &TorrentRecord, now: DateTime<Utc>) -> Transition {
        let since = self.table.since(&record.id);
        match (record.is_completed(), since) {
            (false, None) => Transition::Ignore,
            (false, Some(_)) => Transition::Untrack,
            (true, None) => Transition::Track,
            (true, Some(since)) if now - since > self.threshold => Transition::Delete(since),
            (true, Some(_)) => Transition::Keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        t0() + TimeDelta::minutes(minutes)
    }

    fn torrent(id: &str, state: &str) -> TorrentRecord {
        TorrentRecord::new(id, format!("{id}-name"), state)
    }

    fn hash(id: &str) -> TorrentHash {
        TorrentHash::new(id)
    }

    fn assert_quiet(report: &CycleReport) {
        assert!(report.deletions.is_empty());
        assert!(report.newly_tracked.is_empty());
        assert!(report.untracked.is_empty());
    }

    #[test]
    fn test_new_completed_torrent_is_tracked() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        let report = tracker.observe(&[torrent("h1", "uploading")], t0());

        assert!(report.deletions.is_empty());
        assert_eq!(report.newly_tracked, vec![(hash("h1"), "h1-name".to_string())]);
        assert_eq!(tracker.table().since(&hash("h1")), Some(t0()));
    }

    #[test]
    fn test_incomplete_torrent_is_ignored() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        let report = tracker.observe(&[torrent("h1", "downloading")], t0());

        assert_quiet(&report);
        assert!(tracker.table().is_empty());
    }

    #[test]
    fn test_scenario_seed_then_delete_then_redownload() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));

        let report = tracker.observe(&[torrent("H1", "stalledUP")], at(0));
        assert!(report.deletions.is_empty());
        assert_eq!(tracker.table().since(&hash("H1")), Some(at(0)));

        let report = tracker.observe(&[torrent("H1", "stalledUP")], at(20));
        assert_quiet(&report);
        assert_eq!(tracker.table().since(&hash("H1")), Some(at(0)));

        let report = tracker.observe(&[torrent("H1", "stalledUP")], at(31));
        assert_eq!(
            report.deletions,
            vec![DeletionAction {
                id: hash("H1"),
                name: "H1-name".to_string(),
                tracked_since: at(0),
            }]
        );
        assert!(tracker.table().is_empty());

        let report = tracker.observe(&[torrent("H1", "downloading")], at(35));
        assert_quiet(&report);
        assert!(tracker.table().is_empty());
    }

    #[test]
    fn test_scenario_recheck_untracks() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        tracker.observe(&[torrent("H2", "pausedUP")], at(0));

        let report = tracker.observe(&[torrent("H2", "downloading")], at(10));
        assert!(report.deletions.is_empty());
        assert_eq!(report.untracked, vec![hash("H2")]);
        assert!(!tracker.table().contains(&hash("H2")));
    }

    #[test]
    fn test_regression_past_threshold_does_not_delete() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        tracker.observe(&[torrent("h1", "queuedUP")], at(0));

        let report = tracker.observe(&[torrent("h1", "checkingUP")], at(500));
        assert!(report.deletions.is_empty());
        assert!(tracker.table().is_empty());
    }

    #[test]
    fn test_regrowth_restarts_grace_period() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        tracker.observe(&[torrent("h1", "uploading")], at(0));
        tracker.observe(&[torrent("h1", "downloading")], at(10));
        tracker.observe(&[torrent("h1", "uploading")], at(20));

        let report = tracker.observe(&[torrent("h1", "uploading")], at(45));
        assert!(report.deletions.is_empty());
        assert_eq!(tracker.table().since(&hash("h1")), Some(at(20)));

        let report = tracker.observe(&[torrent("h1", "uploading")], at(51));
        assert_eq!(report.deletions.len(), 1);
    }

    #[test]
    fn test_threshold_boundary() {
        let threshold = TimeDelta::minutes(30);
        let mut tracker = LifecycleTracker::new(threshold);
        tracker.observe(&[torrent("h1", "completed")], t0());

        let report = tracker.observe(&[torrent("h1", "completed")], t0() + threshold);
        assert!(report.deletions.is_empty());

        let report = tracker.observe(
            &[torrent("h1", "completed")],
            t0() + threshold + TimeDelta::milliseconds(1),
        );
        assert_eq!(report.deletions.len(), 1);
    }

    #[test]
    fn test_zero_threshold_deletes_on_second_observation() {
        let mut tracker = LifecycleTracker::new(TimeDelta::zero());
        let report = tracker.observe(&[torrent("h1", "uploading")], t0());
        assert!(report.deletions.is_empty());

        let report = tracker.observe(&[torrent("h1", "uploading")], t0());
        assert!(report.deletions.is_empty());

        let report = tracker.observe(&[torrent("h1", "uploading")], t0() + TimeDelta::seconds(1));
        assert_eq!(report.deletions.len(), 1);
    }

    #[test]
    fn test_clock_going_backwards_does_not_delete() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(1));
        tracker.observe(&[torrent("h1", "uploading")], at(60));

        let report = tracker.observe(&[torrent("h1", "uploading")], at(0));
        assert!(report.deletions.is_empty());
        assert_eq!(tracker.table().since(&hash("h1")), Some(at(60)));
    }

    #[test]
    fn test_absent_torrents_keep_their_entry() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        tracker.observe(&[torrent("h1", "uploading"), torrent("h2", "uploading")], at(0));

        let report = tracker.observe(&[torrent("h2", "uploading")], at(10));
        assert_quiet(&report);
        assert!(tracker.table().contains(&hash("h1")));
        assert_eq!(tracker.table().len(), 2);
    }

    #[test]
    fn test_retain_present_drops_vanished() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        tracker.observe(&[torrent("h1", "uploading"), torrent("h2", "uploading")], at(0));

        let dropped = tracker.retain_present(&[torrent("h2", "uploading")]);
        assert_eq!(dropped, vec![hash("h1")]);
        assert!(!tracker.table().contains(&hash("h1")));
        assert_eq!(tracker.table().since(&hash("h2")), Some(at(0)));
    }

    #[test]
    fn test_restore_reissues_deletion_next_cycle() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(30));
        tracker.observe(&[torrent("h1", "uploading")], at(0));

        let report = tracker.observe(&[torrent("h1", "uploading")], at(31));
        let action = report.deletions[0].clone();
        assert!(tracker.table().is_empty());

        tracker.restore(&action);
        assert_eq!(tracker.table().since(&hash("h1")), Some(at(0)));

        let report = tracker.observe(&[torrent("h1", "uploading")], at(32));
        assert_eq!(report.deletions.len(), 1);
        assert_eq!(report.deletions[0].tracked_since, at(0));
    }

    #[test]
    fn test_mixed_snapshot_counts_and_order() {
        let mut tracker = LifecycleTracker::new(TimeDelta::minutes(5));
        tracker.observe(&[torrent("a", "uploading"), torrent("b", "pausedUP")], at(0));

        let report = tracker.observe(
            &[
                torrent("b", "pausedUP"),
                torrent("c", "downloading"),
                torrent("a", "stalledUP"),
                torrent("d", "queuedUP"),
            ],
            at(6),
        );

        assert_eq!(report.seen, 4);
        assert_eq!(report.completed, 3);
        let deleted: Vec<&str> = report.deletions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(deleted, vec!["b", "a"]);
        assert_eq!(report.newly_tracked, vec![(hash("d"), "d-name".to_string())]);
        assert_eq!(tracker.table().len(), 1);
    }

    #[test]
    fn test_with_table_continues_existing_state() {
        let mut first = LifecycleTracker::new(TimeDelta::minutes(30));
        first.observe(&[torrent("h1", "uploading")], at(0));

        let mut second = LifecycleTracker::with_table(first.threshold(), first.into_table());
        let report = second.observe(&[torrent("h1", "uploading")], at(40));
        assert_eq!(report.deletions.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_no_deletion_within_grace_period(
            threshold_secs in 0i64..100_000,
            offsets in proptest::collection::vec(0i64..100_000, 1..20),
        ) {
            let threshold = TimeDelta::seconds(threshold_secs);
            let mut tracker = LifecycleTracker::new(threshold);
            tracker.observe(&[torrent("h1", "stalledUP")], t0());

            for offset in offsets {
                let elapsed = offset.min(threshold_secs);
                let report = tracker.observe(
                    &[torrent("h1", "stalledUP")],
                    t0() + TimeDelta::seconds(elapsed),
                );
                prop_assert!(report.deletions.is_empty());
                prop_assert_eq!(tracker.table().len(), 1);
                prop_assert_eq!(tracker.table().since(&hash("h1")), Some(t0()));
            }
        }

        #[test]
        fn prop_exactly_one_deletion_past_threshold(
            threshold_secs in 0i64..100_000,
            extra_secs in 1i64..100_000,
        ) {
            let mut tracker = LifecycleTracker::new(TimeDelta::seconds(threshold_secs));
            tracker.observe(&[torrent("h1", "uploading")], t0());

            let report = tracker.observe(
                &[torrent("h1", "uploading")],
                t0() + TimeDelta::seconds(threshold_secs + extra_secs),
            );
            prop_assert_eq!(report.deletions.len(), 1);
            prop_assert!(!tracker.table().contains(&hash("h1")));
        }
    }
}
