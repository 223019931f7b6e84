//! Snapshot history storage.
//!
//! Each (project, file) key owns an ordered, append-only list of snapshots.
//! Insertion order is chronological order; the last element is the most
//! recent observation.
//!
//! Backends:
//! - sqlite: persistent, one row per snapshot
//! - memory: nested maps, used by tests and fixtures
//!
//! The delta aggregator only reads from a store. Appending the enriched
//! snapshot is left to the caller.

pub mod delta;
pub mod memory;
pub mod sqlite;

use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::Snapshot;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid history key: {0}")]
    InvalidKey(String),

    #[error("could not determine data directory: {0}")]
    DataDir(String),
}

/// Composite identifier of one file history
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    project: String,
    file: String,
}

impl HistoryKey {
    /// Both identifiers must be non-empty
    pub fn new(project: impl Into<String>, file: impl Into<String>) -> StoreResult<Self> {
        let project = project.into();
        let file = file.into();

        if project.is_empty() {
            return Err(StoreError::InvalidKey("empty project identifier".to_string()));
        }
        if file.is_empty() {
            return Err(StoreError::InvalidKey(format!(
                "empty file identifier in project '{project}'"
            )));
        }

        Ok(HistoryKey { project, file })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

impl std::fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.project, self.file)
    }
}

pub trait SnapshotStore {
    /// Ordered history for a key, oldest first. Empty if never recorded.
    fn lookup_history(&self, key: &HistoryKey) -> StoreResult<Vec<Snapshot>>;

    /// Append a snapshot to the end of a key's history
    fn append(&mut self, key: &HistoryKey, snapshot: &Snapshot) -> StoreResult<()>;

    /// All projects with at least one snapshot, sorted
    fn projects(&self) -> StoreResult<Vec<String>>;

    /// All files of a project with at least one snapshot, sorted
    fn files(&self, project: &str) -> StoreResult<Vec<String>>;
}

/// Default database path (~/.local/share/filestat/filestat.db or platform equivalent)
pub fn default_db_path() -> StoreResult<PathBuf> {
    let data_dir = directories::ProjectDirs::from("", "", "filestat")
        .ok_or_else(|| StoreError::DataDir("no home directory".to_string()))?
        .data_dir()
        .to_path_buf();

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("filestat.db"))
}
