//! Measures the base fields of a snapshot from source text.
//!
//! - lines: `str::lines` count
//! - length: character count
//! - methods: declarations matched by a per-language pattern

pub mod language;

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::snapshot::FileStats;
pub use language::Language;

// tokens that look like a call header but never start a declaration
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "synchronized", "return"];
const NON_DECL_PREFIXES: &[&str] = &["new", "else", "return", "throw", "await", "yield"];

pub fn measure_source(text: &str, language: Language) -> FileStats {
    FileStats {
        line_count: text.lines().count() as u64,
        file_length: text.chars().count() as u64,
        total_methods: count_methods(text, language),
    }
}

pub fn measure_file(path: &Path) -> io::Result<FileStats> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(measure_source(&text, Language::from_path(path)))
}

fn count_methods(text: &str, language: Language) -> u64 {
    let Some(pattern) = language.method_pattern() else {
        return 0;
    };

    pattern
        .find_iter(text)
        .filter(|m| is_declaration(language, m.as_str()))
        .count() as u64
}

fn is_declaration(language: Language, header: &str) -> bool {
    if !matches!(language, Language::JavaLike | Language::JavaScript) {
        return true;
    }

    let before_paren = header.split('(').next().unwrap_or(header);
    let mut words = before_paren.split_whitespace().rev();
    let name = words.next().unwrap_or_default();
    let prefix = words.next().unwrap_or_default();

    !CONTROL_KEYWORDS.contains(&name) && !NON_DECL_PREFIXES.contains(&prefix)
}

/// A source file found under a root, with its identifier inside the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub id: String,
}

/// Expand a record argument into source files.
///
/// A directory is walked, skipping hidden entries, and keeps files whose
/// extension is in `extensions` (all files if empty). A file is taken as
/// given. Either way the identifier is the resolved path relative to
/// `project_root` with `/` separators, so one file always maps to one id
/// however it was named on the command line. Files outside the project root
/// keep their absolute path as id.
pub fn collect_files(
    path: &Path,
    project_root: &Path,
    extensions: &[String],
    diagnostics: &mut Vec<String>,
) -> Vec<SourceFile> {
    let path = match path.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            diagnostics.push(format!("skipping {}: {e}", path.display()));
            return Vec::new();
        }
    };
    let project_root = project_root
        .canonicalize()
        .unwrap_or_else(|_| project_root.to_path_buf());

    if path.is_file() {
        let id = file_id(&path, &project_root);
        return vec![SourceFile { path, id }];
    }

    let wanted: BTreeSet<String> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let walker = WalkDir::new(&path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                diagnostics.push(format!("skipping unreadable entry: {e}"));
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_wanted_extension(entry.path(), &wanted) {
            continue;
        }

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            id: file_id(entry.path(), &project_root),
        });
    }

    files
}

fn file_id(path: &Path, project_root: &Path) -> String {
    path_id(path.strip_prefix(project_root).unwrap_or(path))
}

fn has_wanted_extension(path: &Path, wanted: &BTreeSet<String>) -> bool {
    if wanted.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| wanted.contains(&e.to_ascii_lowercase()))
        .unwrap_or(false)
}

fn path_id(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::RootDir => Some(String::new()),
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}
