//! Runtime configuration.
//!
//! Built from CLI arguments layered over an optional TOML file at
//! `<config dir>/filestat/config.toml`:
//!
//! ```toml
//! database = "/path/to/filestat.db"
//! extensions = ["rs", "java", "py"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;
use crate::store::{self, StoreResult};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Missing file means defaults. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(FileConfig::default());
        }
        debug!(path = %path.display(), "loading config file");
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }
}

pub struct Config {
    /// None means the platform data directory
    pub db_path: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub json_output: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli, file: FileConfig) -> Self {
        Config {
            db_path: cli.db.clone().or(file.database),
            extensions: file.extensions.unwrap_or_else(default_extensions),
            json_output: false,
            verbose: cli.verbose,
        }
    }

    /// Resolved database location
    pub fn database(&self) -> StoreResult<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => store::default_db_path(),
        }
    }

    pub fn default() -> Self {
        Config {
            db_path: None,
            extensions: default_extensions(),
            json_output: false,
            verbose: false,
        }
    }
}

/// Path of the optional config file, if a home directory exists
pub fn config_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "filestat").map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn default_extensions() -> Vec<String> {
    ["java", "kt", "cs", "scala", "rs", "py", "js", "jsx", "ts", "tsx", "go"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}
