use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Source languages with a known method declaration pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// java, kotlin, c#, scala: brace languages with modifiers before the return type
    JavaLike,
    Rust,
    Python,
    JavaScript,
    Go,
    Unknown,
}

impl Language {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("java" | "kt" | "kts" | "cs" | "scala" | "groovy") => Language::JavaLike,
            Some("rs") => Language::Rust,
            Some("py" | "pyi") => Language::Python,
            Some("js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx") => Language::JavaScript,
            Some("go") => Language::Go,
            _ => Language::Unknown,
        }
    }

    pub(crate) fn method_pattern(self) -> Option<&'static Regex> {
        match self {
            Language::JavaLike => Some(compiled(&JAVA_LIKE, JAVA_LIKE_SRC)),
            Language::Rust => Some(compiled(&RUST, RUST_SRC)),
            Language::Python => Some(compiled(&PYTHON, PYTHON_SRC)),
            Language::JavaScript => Some(compiled(&JAVASCRIPT, JAVASCRIPT_SRC)),
            Language::Go => Some(compiled(&GO, GO_SRC)),
            Language::Unknown => None,
        }
    }
}

// line-anchored patterns, matched with multi-line mode
const JAVA_LIKE_SRC: &str = r"(?m)^\s*(?:(?:public|protected|private|static|final|abstract|synchronized|native|override|open|suspend|internal|virtual|async)\s+)*(?:fun\s+\w+|[\w<>\[\],.?]+\s+\w+)\s*\([^;{]*\)\s*(?:throws\s+[\w.,\s]+)?\s*\{";
const RUST_SRC: &str = r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+\S+\s+)?fn\s+\w+";
const PYTHON_SRC: &str = r"(?m)^\s*(?:async\s+)?def\s+\w+\s*\(";
const JAVASCRIPT_SRC: &str = r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*\w+\s*\(|^\s*(?:(?:public|private|protected|static|async|get|set)\s+)*\w+\s*\([^;)]*\)\s*(?::\s*[\w<>\[\]|, ]+)?\s*\{";
const GO_SRC: &str = r"(?m)^func\s+(?:\([^)]*\)\s*)?\w+\s*\(";

static JAVA_LIKE: OnceLock<Regex> = OnceLock::new();
static RUST: OnceLock<Regex> = OnceLock::new();
static PYTHON: OnceLock<Regex> = OnceLock::new();
static JAVASCRIPT: OnceLock<Regex> = OnceLock::new();
static GO: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, src: &str) -> &'static Regex {
    // patterns are constants, covered by the tests below
    cell.get_or_init(|| Regex::new(src).expect("method pattern must compile"))
}
