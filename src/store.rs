//! JSON-on-disk project persistence.
//!
//! All saved projects live in a single JSON file holding a list ordered by
//! recency. Saves rewrite the whole file; project counts are small enough
//! that this stays cheap and keeps the format trivially inspectable.

use crate::document::Document;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store format: {0}")]
    Format(#[from] serde_json::Error),
}

/// One persisted project. Sections are stored verbatim; metadata is
/// flattened so the project list can render without touching section data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProject {
    pub id: String,
    pub title: String,
    pub journal_name: String,
    pub citation: String,
    pub layout_id: String,
    pub header_color: String,
    pub sections: Vec<Section>,
    /// Seconds since the Unix epoch at last save.
    pub last_modified: u64,
}

impl SavedProject {
    /// Snapshot a document for storage. `id` is reused when the project was
    /// saved before, otherwise a fresh one is minted.
    pub fn from_document(doc: &Document, id: Option<&str>) -> Self {
        Self {
            id: id
                .map(str::to_owned)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: doc.title.clone(),
            journal_name: doc.journal_name.clone(),
            citation: doc.citation.clone(),
            layout_id: doc.layout_template_id.clone(),
            header_color: doc.header_color.clone(),
            sections: doc.sections.clone(),
            last_modified: now_secs(),
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// All saved projects, most recently saved first. A missing file is an
    /// empty store, not an error.
    pub fn list(&self) -> Result<Vec<SavedProject>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedProject>, StoreError> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Insert or update by id, moving the project to the front of the list.
    pub fn save(&self, project: &SavedProject) -> Result<(), StoreError> {
        let mut projects = self.list()?;
        projects.retain(|p| p.id != project.id);
        projects.insert(0, project.clone());
        self.write(&projects)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut projects = self.list()?;
        projects.retain(|p| p.id != id);
        self.write(&projects)
    }

    fn write(&self, projects: &[SavedProject]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(projects)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ProjectStore {
        ProjectStore::new(dir.path().join("projects.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).list().unwrap().is_empty());
    }

    #[test]
    fn save_then_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let doc = Document::from_template("clinical-trial");
        let saved = SavedProject::from_document(&doc, None);
        store.save(&saved).unwrap();
        let loaded = store.get(&saved.id).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(Document::from_saved(&loaded).sections, doc.sections);
    }

    #[test]
    fn resave_updates_in_place_and_moves_to_front() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let doc = Document::from_template("clinical-trial");
        let first = SavedProject::from_document(&doc, None);
        let second = SavedProject::from_document(&doc, None);
        store.save(&first).unwrap();
        store.save(&second).unwrap();
        let mut updated = first.clone();
        updated.title = "Renamed".into();
        store.save(&updated).unwrap();
        let list = store.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, first.id);
        assert_eq!(list[0].title, "Renamed");
    }

    #[test]
    fn delete_removes_only_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let doc = Document::from_template("blank-canvas");
        let a = SavedProject::from_document(&doc, None);
        let b = SavedProject::from_document(&doc, None);
        store.save(&a).unwrap();
        store.save(&b).unwrap();
        store.delete(&a.id).unwrap();
        let list = store.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, b.id);
    }
}
