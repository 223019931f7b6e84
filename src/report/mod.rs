pub mod table;
pub mod json;

use serde::Serialize;

use crate::config::Config;
use crate::snapshot::Snapshot;
use crate::summary::{summarize, SummaryRow};

/// One recorded or looked-up file, ready for rendering
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub project: &'a str,
    pub file: &'a str,
    pub snapshot: &'a Snapshot,
    pub summary: Vec<SummaryRow>,
}

impl<'a> FileReport<'a> {
    pub fn new(project: &'a str, file: &'a str, snapshot: &'a Snapshot) -> Self {
        FileReport {
            project,
            file,
            snapshot,
            summary: summarize(snapshot),
        }
    }
}

pub fn print(reports: &[FileReport], diagnostics: &[String], config: &Config) {
    if config.json_output {
        println!("{}", json::render(reports));
    } else {
        for report in reports {
            print!("{}", table::render(report));
        }
        if reports.is_empty() {
            println!("No files recorded.");
        }
    }
    print_diagnostics(diagnostics, config.verbose);
}

fn print_diagnostics(diagnostics: &[String], verbose: bool) {
    if diagnostics.is_empty() {
        return;
    }

    eprintln!();
    if verbose {
        eprintln!("Diagnostics:");
        eprintln!("{}", "-".repeat(40));
        for diagnostic in diagnostics {
            eprintln!("  {diagnostic}");
        }
    } else {
        for diagnostic in diagnostics {
            eprintln!("[diagnostic] {diagnostic}");
        }
    }
}
