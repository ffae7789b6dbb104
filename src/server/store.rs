//! Named layout storage for the dev server
//!
//! Layouts live in memory, keyed and ordered by name. When the store has a
//! file, every mutation rewrites it as pretty RON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::world::{validate_name, Layout, LayoutError, SavedPanel};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Incomplete data")]
    Incomplete,

    #[error("Invalid name")]
    InvalidName,

    #[error("Name already in use")]
    NameInUse,

    #[error("Layout '{0}' not found")]
    NotFound(String),

    #[error("Invalid layout: {0}")]
    Invalid(LayoutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

impl From<LayoutError> for StoreError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::EmptyName => StoreError::Incomplete,
            LayoutError::ReservedName(_) => StoreError::InvalidName,
            other => StoreError::Invalid(other),
        }
    }
}

impl StoreError {
    /// HTTP status reported for this error
    pub fn status(&self) -> u16 {
        match self {
            StoreError::Incomplete
            | StoreError::InvalidName
            | StoreError::NameInUse
            | StoreError::Invalid(_) => 400,
            StoreError::NotFound(_) => 404,
            StoreError::Io(_) | StoreError::Parse(_) | StoreError::Serialize(_) => 500,
        }
    }
}

/// Fields of an update; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPatch {
    pub name: Option<String>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub panels: Option<Vec<SavedPanel>>,
}

/// On-disk form
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    layouts: Vec<Layout>,
}

#[derive(Debug, Default)]
pub struct LayoutStore {
    layouts: BTreeMap<String, Layout>,
    path: Option<PathBuf>,
}

impl LayoutStore {
    /// Store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store file, starting empty if it does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut layouts = BTreeMap::new();
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let file: StoreFile = ron::from_str(&contents)?;
            for layout in file.layouts {
                layout.validate()?;
                layouts.insert(layout.name.clone(), layout);
            }
        }
        Ok(Self {
            layouts,
            path: Some(path),
        })
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// All names, ascending
    pub fn names(&self) -> Vec<String> {
        self.layouts.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Result<&Layout, StoreError> {
        self.layouts
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Add a new layout; existing names are never overwritten
    pub fn create(&mut self, layout: Layout) -> Result<(), StoreError> {
        validate_name(&layout.name)?;
        if self.layouts.contains_key(&layout.name) {
            return Err(StoreError::NameInUse);
        }
        layout.validate()?;
        let mut next = self.layouts.clone();
        next.insert(layout.name.clone(), layout);
        self.commit(next)
    }

    /// Replace the given fields of a stored layout (renaming is allowed)
    pub fn update(&mut self, name: &str, patch: LayoutPatch) -> Result<(), StoreError> {
        let current = self.get(name)?;
        let updated = Layout {
            name: patch.name.unwrap_or_else(|| current.name.clone()),
            width: patch.width.unwrap_or(current.width),
            height: patch.height.unwrap_or(current.height),
            panels: patch.panels.unwrap_or_else(|| current.panels.clone()),
        };
        validate_name(&updated.name)?;
        if updated.name != name && self.layouts.contains_key(&updated.name) {
            return Err(StoreError::NameInUse);
        }
        updated.validate()?;

        let mut next = self.layouts.clone();
        next.remove(name);
        next.insert(updated.name.clone(), updated);
        self.commit(next)
    }

    pub fn delete(&mut self, name: &str) -> Result<Layout, StoreError> {
        let mut next = self.layouts.clone();
        let removed = next
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        self.commit(next)?;
        Ok(removed)
    }

    /// Write `next` to disk, then make it current. A failed write changes nothing.
    fn commit(&mut self, next: BTreeMap<String, Layout>) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            write_file(path, &next)?;
        }
        self.layouts = next;
        Ok(())
    }
}

fn write_file(path: &Path, layouts: &BTreeMap<String, Layout>) -> Result<(), StoreError> {
    let file = StoreFile {
        layouts: layouts.values().cloned().collect(),
    };
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    let ron_string = ron::ser::to_string_pretty(&file, config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, ron_string)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::PanelState;
    use tempfile::TempDir;

    fn layout(name: &str) -> Layout {
        Layout {
            name: name.into(),
            width: 3,
            height: 3,
            panels: vec![SavedPanel { x: 0, y: 0, horizontal: true, state: PanelState::Wall }],
        }
    }

    #[test]
    fn test_create_rules() {
        let mut store = LayoutStore::in_memory();
        store.create(layout("foo")).unwrap();
        assert!(matches!(store.create(layout("foo")), Err(StoreError::NameInUse)));
        assert!(matches!(store.create(layout("names")), Err(StoreError::InvalidName)));
        assert!(matches!(store.create(layout("")), Err(StoreError::Incomplete)));

        let mut bad = layout("bad");
        bad.panels[0].x = 9;
        let err = store.create(bad).unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(store.names(), vec!["foo"]);
    }

    #[test]
    fn test_names_sorted() {
        let mut store = LayoutStore::in_memory();
        for name in ["kitchen", "attic", "bath"] {
            store.create(layout(name)).unwrap();
        }
        assert_eq!(store.names(), vec!["attic", "bath", "kitchen"]);
    }

    #[test]
    fn test_update_and_rename() {
        let mut store = LayoutStore::in_memory();
        store.create(layout("foo")).unwrap();
        store.create(layout("taken")).unwrap();

        store
            .update("foo", LayoutPatch { width: Some(4), panels: Some(vec![]), ..Default::default() })
            .unwrap();
        let updated = store.get("foo").unwrap();
        assert_eq!((updated.width, updated.height), (4, 3));
        assert!(updated.panels.is_empty());

        let rename = LayoutPatch { name: Some("taken".into()), ..Default::default() };
        assert!(matches!(store.update("foo", rename), Err(StoreError::NameInUse)));

        let rename = LayoutPatch { name: Some("bar".into()), ..Default::default() };
        store.update("foo", rename).unwrap();
        assert_eq!(store.names(), vec!["bar", "taken"]);

        assert_eq!(store.update("nope", LayoutPatch::default()).unwrap_err().status(), 404);
    }

    #[test]
    fn test_delete() {
        let mut store = LayoutStore::in_memory();
        store.create(layout("foo")).unwrap();
        assert_eq!(store.delete("foo").unwrap().name, "foo");
        assert!(store.is_empty());
        assert!(matches!(store.delete("foo"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("layouts.ron");

        let mut store = LayoutStore::open(&path).unwrap();
        assert!(store.is_empty());
        store.create(layout("foo")).unwrap();
        store.create(layout("bar")).unwrap();
        store.delete("bar").unwrap();
        assert!(path.exists());

        let reopened = LayoutStore::open(&path).unwrap();
        assert_eq!(reopened.names(), vec!["foo"]);
        assert_eq!(reopened.get("foo").unwrap(), &layout("foo"));
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layouts.ron");
        let mut store = LayoutStore::open(&path).unwrap();
        store.create(layout("foo")).unwrap();

        // Nothing can be written once the data path is a directory
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = store.create(layout("bar")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(err.status(), 500);
        assert_eq!(store.names(), vec!["foo"]);

        let patch = LayoutPatch { name: Some("baz".into()), ..Default::default() };
        assert_eq!(store.update("foo", patch).unwrap_err().status(), 500);
        assert_eq!(store.names(), vec!["foo"]);

        assert_eq!(store.delete("foo").unwrap_err().status(), 500);
        assert_eq!(store.get("foo").unwrap(), &layout("foo"));
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layouts.ron");
        fs::write(&path, "(layouts: [oops").unwrap();
        assert!(matches!(LayoutStore::open(&path), Err(StoreError::Parse(_))));
    }
}
