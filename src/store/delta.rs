//! Delta aggregation against a file's history.
//!
//! Two steps:
//! - load: one history read from a store, picks the baseline
//! - enrich: pure, sets the delta of a new snapshot against the baseline
//!
//! A file seen for the first time has no baseline and its snapshot keeps
//! no delta at all. Missing history is never reported as a zero delta.

use tracing::debug;

use super::{HistoryKey, SnapshotStore, StoreResult};
use crate::snapshot::{Delta, FileStats, Snapshot};

/// The most recent prior snapshot, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    NoBaseline,
    Prior(Snapshot),
}

impl Baseline {
    /// Last element of an ordered history
    pub fn from_history(history: &[Snapshot]) -> Self {
        match history.last() {
            Some(last) => Baseline::Prior(last.clone()),
            None => Baseline::NoBaseline,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Baseline::Prior(snapshot) => Some(snapshot),
            Baseline::NoBaseline => None,
        }
    }
}

/// Signed difference of each base field, current minus prior
pub fn compute_delta(current: &FileStats, prior: &FileStats) -> Delta {
    Delta {
        new_lines: signed_sub(current.line_count, prior.line_count),
        new_file_length: signed_sub(current.file_length, prior.file_length),
        new_methods: signed_sub(current.total_methods, prior.total_methods),
    }
}

fn signed_sub(current: u64, prior: u64) -> i64 {
    let delta = i128::from(current) - i128::from(prior);
    i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
}

/// Build a snapshot from base fields, with a delta iff a baseline exists
pub fn enrich(stats: FileStats, recorded_at: i64, baseline: Option<&Snapshot>) -> Snapshot {
    let delta = baseline.map(|prior| compute_delta(&stats, &prior.stats));
    Snapshot::new(stats, recorded_at).with_delta(delta)
}

/// Bound to one (project, file) history. Single use: load, enrich, discard.
#[derive(Debug, Clone)]
pub struct DeltaAggregator {
    key: HistoryKey,
    baseline: Baseline,
}

impl DeltaAggregator {
    /// Read the history for `project`/`file` once and pick its baseline.
    ///
    /// An unknown key is not an error. Store failures are returned as-is.
    pub fn load<S: SnapshotStore + ?Sized>(
        store: &S,
        project: &str,
        file: &str,
    ) -> StoreResult<Self> {
        let key = HistoryKey::new(project, file)?;
        let history = store.lookup_history(&key)?;
        Ok(Self::from_history(key, &history))
    }

    pub fn from_history(key: HistoryKey, history: &[Snapshot]) -> Self {
        let baseline = Baseline::from_history(history);
        debug!(
            key = %key,
            prior_snapshots = history.len(),
            "bound delta aggregator"
        );
        DeltaAggregator { key, baseline }
    }

    pub fn key(&self) -> &HistoryKey {
        &self.key
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn has_baseline(&self) -> bool {
        matches!(self.baseline, Baseline::Prior(_))
    }

    /// Set the delta of `snapshot` from its base fields.
    ///
    /// Without a baseline the delta is cleared, never zeroed. Any delta
    /// already present is recomputed, so repeated calls agree.
    pub fn enrich_with_delta(&self, snapshot: Snapshot) -> Snapshot {
        let delta = self
            .baseline
            .snapshot()
            .map(|prior| compute_delta(&snapshot.stats, &prior.stats));
        snapshot.with_delta(delta)
    }
}
