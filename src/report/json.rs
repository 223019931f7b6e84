//! JSON output for file reports and histories.
//!
//! Serializes reports to JSON for scripting and piping.

use serde::Serialize;

use super::FileReport;
use crate::snapshot::Snapshot;

#[derive(Serialize)]
struct HistoryReport<'a> {
    project: &'a str,
    file: &'a str,
    history: &'a [Snapshot],
}

pub fn render(reports: &[FileReport]) -> String {
    to_json(&reports)
}

pub fn render_history(project: &str, file: &str, history: &[Snapshot]) -> String {
    to_json(&HistoryReport {
        project,
        file,
        history,
    })
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("{}"))
}
