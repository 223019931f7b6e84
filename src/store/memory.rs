//! In-memory snapshot store.
//!
//! project -> file -> ordered snapshots. Not persistent.

use std::collections::HashMap;

use super::{HistoryKey, SnapshotStore, StoreResult};
use crate::snapshot::Snapshot;

#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: HashMap<String, HashMap<String, Vec<Snapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key with a full history, replacing whatever was there
    pub fn with_history(mut self, key: &HistoryKey, history: Vec<Snapshot>) -> Self {
        self.projects
            .entry(key.project().to_string())
            .or_default()
            .insert(key.file().to_string(), history);
        self
    }
}

impl SnapshotStore for MemoryStore {
    fn lookup_history(&self, key: &HistoryKey) -> StoreResult<Vec<Snapshot>> {
        let history = self
            .projects
            .get(key.project())
            .and_then(|files| files.get(key.file()))
            .cloned()
            .unwrap_or_default();

        Ok(history)
    }

    fn append(&mut self, key: &HistoryKey, snapshot: &Snapshot) -> StoreResult<()> {
        self.projects
            .entry(key.project().to_string())
            .or_default()
            .entry(key.file().to_string())
            .or_default()
            .push(snapshot.clone());

        Ok(())
    }

    fn projects(&self) -> StoreResult<Vec<String>> {
        let mut projects: Vec<String> = self
            .projects
            .iter()
            .filter(|(_, files)| files.values().any(|h| !h.is_empty()))
            .map(|(name, _)| name.clone())
            .collect();
        projects.sort();
        Ok(projects)
    }

    fn files(&self, project: &str) -> StoreResult<Vec<String>> {
        let mut files: Vec<String> = self
            .projects
            .get(project)
            .map(|files| {
                files
                    .iter()
                    .filter(|(_, h)| !h.is_empty())
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default();
        files.sort();
        Ok(files)
    }
}
