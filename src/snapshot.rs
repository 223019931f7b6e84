//! Snapshot data model.
//!
//! A snapshot is one measurement of a file at one point in time:
//! - base fields: lines, characters, method declarations
//! - an optional delta against the previous snapshot of the same file
//!
//! The delta is all-or-nothing. The first snapshot of a file has none.

use serde::{Deserialize, Serialize};

/// Base measurements of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub line_count: u64,
    pub file_length: u64,
    pub total_methods: u64,
}

impl FileStats {
    pub fn new(line_count: u64, file_length: u64, total_methods: u64) -> Self {
        FileStats {
            line_count,
            file_length,
            total_methods,
        }
    }
}

/// Signed change of each base field since the previous snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub new_lines: i64,
    pub new_file_length: i64,
    pub new_methods: i64,
}

impl Delta {
    pub fn is_unchanged(&self) -> bool {
        self.new_lines == 0 && self.new_file_length == 0 && self.new_methods == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub stats: FileStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
    /// unix seconds, display only. history order is append order
    pub recorded_at: i64,
}

impl Snapshot {
    /// A snapshot with base fields set and no delta yet
    pub fn new(stats: FileStats, recorded_at: i64) -> Self {
        Snapshot {
            stats,
            delta: None,
            recorded_at,
        }
    }

    pub fn with_delta(mut self, delta: Option<Delta>) -> Self {
        self.delta = delta;
        self
    }
}

/// Current time as unix seconds, 0 if the clock is before the epoch
pub fn now_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
