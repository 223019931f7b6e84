//! Summary rows for one snapshot.
//!
//! Plain name/value pairs. Delta rows appear only when the snapshot has a
//! delta, so a first observation never shows up as "no change".

use serde::Serialize;

use crate::snapshot::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub name: &'static str,
    pub value: String,
}

impl SummaryRow {
    fn new(name: &'static str, value: impl ToString) -> Self {
        SummaryRow {
            name,
            value: value.to_string(),
        }
    }
}

pub fn summarize(snapshot: &Snapshot) -> Vec<SummaryRow> {
    let mut rows = vec![
        SummaryRow::new("Lines", snapshot.stats.line_count),
        SummaryRow::new("Characters", snapshot.stats.file_length),
        SummaryRow::new("Methods", snapshot.stats.total_methods),
    ];

    if let Some(delta) = snapshot.delta {
        rows.push(SummaryRow::new("New lines", format_signed(delta.new_lines)));
        rows.push(SummaryRow::new("New characters", format_signed(delta.new_file_length)));
        rows.push(SummaryRow::new("New methods", format_signed(delta.new_methods)));
    }

    rows
}

/// "+5", "-3", "0"
pub fn format_signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}
