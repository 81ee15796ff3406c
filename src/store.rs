//! The query-folder store.
//!
//! Definitions live as `<id>.toml` files inside the databoxes folder the
//! install handler creates. This is flat-file plumbing, not a storage
//! engine: one file per box, listing sorted by id.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{self, DataBox, LoadError};

/// Errors raised by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("No databox with id '{0}'")]
    NotFound(String),

    #[error("Databox '{0}' already exists")]
    AlreadyExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// A directory of databox definitions.
pub struct DataBoxStore {
    root: PathBuf,
}

impl DataBoxStore {
    /// Open an existing store folder.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::FolderNotFound(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.toml"))
    }

    /// Ids of all stored boxes, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Create a new box; fails when the id is taken.
    pub fn create(&self, databox: &DataBox) -> Result<(), StoreError> {
        let path = self.path_of(&databox.id);
        if path.exists() {
            return Err(StoreError::AlreadyExists(databox.id.clone()));
        }
        model::save(databox, &path)?;
        Ok(())
    }

    /// Save a box, overwriting any previous definition.
    pub fn save(&self, databox: &DataBox) -> Result<(), StoreError> {
        model::save(databox, &self.path_of(&databox.id))?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<DataBox, StoreError> {
        let path = self.path_of(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(model::load(&path)?)
    }

    /// Load every stored box, in id order.
    pub fn load_all(&self) -> Result<Vec<DataBox>, StoreError> {
        let mut boxes = Vec::new();
        for id in self.list()? {
            boxes.push(self.get(&id)?);
        }
        Ok(boxes)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.path_of(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}
