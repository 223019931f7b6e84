//! Record pass: measure, enrich against history, append.
//!
//! Each file gets its own single-use aggregator. Files that cannot be read
//! become diagnostics; store failures abort the pass.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::measure::{self, SourceFile};
use crate::snapshot::{self, FileStats, Snapshot};
use crate::store::delta::DeltaAggregator;
use crate::store::{SnapshotStore, StoreResult};

#[derive(Debug, Clone)]
pub struct RecordedFile {
    pub file: String,
    pub snapshot: Snapshot,
}

#[derive(Debug, Default)]
pub struct RecordResult {
    pub recorded: Vec<RecordedFile>,
    pub diagnostics: Vec<String>,
}

/// Enrich `stats` against the stored history of `project`/`file` and append it
pub fn record_file<S: SnapshotStore + ?Sized>(
    store: &mut S,
    project: &str,
    file: &str,
    stats: FileStats,
    recorded_at: i64,
) -> StoreResult<Snapshot> {
    let aggregator = DeltaAggregator::load(&*store, project, file)?;
    let snapshot = aggregator.enrich_with_delta(Snapshot::new(stats, recorded_at));
    store.append(aggregator.key(), &snapshot)?;
    Ok(snapshot)
}

pub fn run<S: SnapshotStore + ?Sized>(
    store: &mut S,
    project: &str,
    project_root: &Path,
    paths: &[PathBuf],
    config: &Config,
) -> StoreResult<RecordResult> {
    let mut result = RecordResult::default();
    let recorded_at = snapshot::now_timestamp();

    let mut files: Vec<SourceFile> = Vec::new();
    for path in paths {
        files.extend(measure::collect_files(
            path,
            project_root,
            &config.extensions,
            &mut result.diagnostics,
        ));
    }
    debug!(project, files = files.len(), "recording files");

    for source in files {
        let stats = match measure::measure_file(&source.path) {
            Ok(stats) => stats,
            Err(e) => {
                warn!(path = %source.path.display(), error = %e, "skipping unreadable file");
                result
                    .diagnostics
                    .push(format!("failed to read {}: {e}", source.path.display()));
                continue;
            }
        };

        let snapshot = record_file(&mut *store, project, &source.id, stats, recorded_at)?;
        result.recorded.push(RecordedFile {
            file: source.id,
            snapshot,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Delta;
    use crate::store::memory::MemoryStore;
    use crate::store::HistoryKey;

    #[test]
    fn first_record_has_no_delta_second_does() {
        let mut store = MemoryStore::new();

        let first = record_file(&mut store, "P", "a.txt", FileStats::new(10, 200, 2), 1).unwrap();
        assert!(first.delta.is_none());

        let second = record_file(&mut store, "P", "a.txt", FileStats::new(15, 260, 3), 2).unwrap();
        assert_eq!(
            second.delta,
            Some(Delta {
                new_lines: 5,
                new_file_length: 60,
                new_methods: 1,
            })
        );

        let history = store.lookup_history(&HistoryKey::new("P", "a.txt").unwrap()).unwrap();
        assert_eq!(history, vec![first, second]);
    }

    #[test]
    fn shrinking_file_compares_with_latest() {
        let mut store = MemoryStore::new();
        record_file(&mut store, "P", "a.txt", FileStats::new(20, 400, 4), 1).unwrap();
        record_file(&mut store, "P", "a.txt", FileStats::new(15, 300, 3), 2).unwrap();
        let third = record_file(&mut store, "P", "a.txt", FileStats::new(10, 200, 2), 3).unwrap();

        assert_eq!(third.delta.unwrap().new_lines, -5);
    }

    #[test]
    fn invalid_project_appends_nothing() {
        let mut store = MemoryStore::new();
        assert!(record_file(&mut store, "", "a.txt", FileStats::default(), 0).is_err());
        assert!(store.projects().unwrap().is_empty());
    }

    #[test]
    fn run_records_walked_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "def f():\n    pass\n").unwrap();
        std::fs::write(dir.path().join("b.md"), "# notes\n").unwrap();

        let mut store = MemoryStore::new();
        let config = Config::default();
        let result = run(&mut store, "P", dir.path(), &[dir.path().to_path_buf()], &config).unwrap();

        assert_eq!(result.recorded.len(), 1);
        assert_eq!(result.recorded[0].file, "a.py");
        assert_eq!(result.recorded[0].snapshot.stats, FileStats::new(2, 18, 1));
        assert_eq!(store.files("P").unwrap(), vec!["a.py"]);
    }
}
