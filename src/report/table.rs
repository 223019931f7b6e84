//! Terminal tables for file reports and histories.
//!
//! - one name/value table per recorded file
//! - one row per snapshot for a history, oldest first

use crate::snapshot::Snapshot;
use crate::summary::format_signed;

use super::FileReport;

pub fn render(report: &FileReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", truncate(report.file, 60)));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    output.push_str(&format!("  {:24} {:>12}\n", "Name", "Value"));
    for row in &report.summary {
        output.push_str(&format!("  {:24} {:>12}\n", row.name, row.value));
    }

    if report.snapshot.delta.is_none() {
        output.push_str("  (first observation, no previous snapshot)\n");
    }

    output
}

pub fn render_history(file: &str, history: &[Snapshot]) -> String {
    if history.is_empty() {
        return format!("No snapshots recorded for {file}.\n");
    }

    let mut output = String::new();
    output.push_str(&format!("\n{}\n", truncate(file, 60)));
    output.push_str(&format!(
        "{:<4} {:<20} {:>8} {:>10} {:>8} {:>8} {:>10} {:>8}\n",
        "#", "Date", "Lines", "Chars", "Methods", "+Lines", "+Chars", "+Methods"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for (index, snapshot) in history.iter().enumerate() {
        let (lines, chars, methods) = match snapshot.delta {
            Some(d) => (
                format_signed(d.new_lines),
                format_signed(d.new_file_length),
                format_signed(d.new_methods),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };

        output.push_str(&format!(
            "{:<4} {:<20} {:>8} {:>10} {:>8} {:>8} {:>10} {:>8}\n",
            index + 1,
            format_timestamp(snapshot.recorded_at),
            snapshot.stats.line_count,
            snapshot.stats.file_length,
            snapshot.stats.total_methods,
            lines,
            chars,
            methods
        ));
    }

    output
}

pub fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let truncated: String = s.chars().skip(s.chars().count() - keep).collect();
        format!("...{truncated}")
    }
}
