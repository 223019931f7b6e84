use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

use super::{HistoryKey, SnapshotStore, StoreResult};
use crate::snapshot::{Delta, FileStats, Snapshot};

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project TEXT NOT NULL,
            file TEXT NOT NULL,
            recorded_at INTEGER NOT NULL,
            line_count INTEGER NOT NULL,
            file_length INTEGER NOT NULL,
            total_methods INTEGER NOT NULL,
            new_lines INTEGER,
            new_file_length INTEGER,
            new_methods INTEGER
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_snapshots_key ON snapshots(project, file, id)",
        [],
    )?;

    Ok(())
}

/// Database handle. Open once per command, reuse across all operations.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening snapshot database");
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }
}

impl SnapshotStore for SqliteStore {
    fn lookup_history(&self, key: &HistoryKey) -> StoreResult<Vec<Snapshot>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT recorded_at, line_count, file_length, total_methods,
                    new_lines, new_file_length, new_methods
             FROM snapshots
             WHERE project = ?1 AND file = ?2
             ORDER BY id ASC",
        )?;

        let history = stmt
            .query_map(params![key.project(), key.file()], snapshot_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(key = %key, snapshots = history.len(), "loaded history");
        Ok(history)
    }

    fn append(&mut self, key: &HistoryKey, snapshot: &Snapshot) -> StoreResult<()> {
        let tx = self.conn.transaction()?;

        let delta = snapshot.delta;
        tx.execute(
            "INSERT INTO snapshots (project, file, recorded_at, line_count, file_length, total_methods,
                                    new_lines, new_file_length, new_methods)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                key.project(),
                key.file(),
                snapshot.recorded_at,
                to_sql_int(snapshot.stats.line_count),
                to_sql_int(snapshot.stats.file_length),
                to_sql_int(snapshot.stats.total_methods),
                delta.map(|d| d.new_lines),
                delta.map(|d| d.new_file_length),
                delta.map(|d| d.new_methods),
            ],
        )?;

        tx.commit()?;
        debug!(key = %key, has_delta = delta.is_some(), "appended snapshot");
        Ok(())
    }

    fn projects(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT project FROM snapshots ORDER BY project")?;

        let projects = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(projects)
    }

    fn files(&self, project: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT file FROM snapshots WHERE project = ?1 ORDER BY file",
        )?;

        let files = stmt
            .query_map(params![project], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(files)
    }
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn snapshot_from_row(row: &rusqlite::Row) -> rusqlite::Result<Snapshot> {
    let stats = FileStats {
        line_count: row.get::<_, i64>(1)?.max(0) as u64,
        file_length: row.get::<_, i64>(2)?.max(0) as u64,
        total_methods: row.get::<_, i64>(3)?.max(0) as u64,
    };

    // a delta only counts if every column is present
    let delta = match (
        row.get::<_, Option<i64>>(4)?,
        row.get::<_, Option<i64>>(5)?,
        row.get::<_, Option<i64>>(6)?,
    ) {
        (Some(new_lines), Some(new_file_length), Some(new_methods)) => Some(Delta {
            new_lines,
            new_file_length,
            new_methods,
        }),
        _ => None,
    };

    Ok(Snapshot {
        stats,
        delta,
        recorded_at: row.get(0)?,
    })
}
