//! Catalog fixtures.
//!
//! A fixture is a JSON file carrying content-type schemas and records,
//! enough to drive a query folder end to end from the CLI and the tests.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::{Catalog, Record};
use crate::schema::{SchemaRegistry, TypeInfo};

/// Errors raised while loading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Fixture not found: {path}")]
    NotFound { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },
}

/// The serialized form of a catalog.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFixture {
    pub types: Vec<TypeInfo>,
    pub records: Vec<Record>,
}

impl CatalogFixture {
    /// Build the catalog this fixture describes.
    pub fn into_catalog(self) -> Catalog {
        let mut schemas = SchemaRegistry::new();
        for info in self.types {
            schemas.register(info);
        }
        let mut catalog = Catalog::new(schemas);
        for record in self.records {
            catalog.insert(record);
        }
        catalog
    }
}

/// Load a catalog from a JSON fixture file.
pub fn load_catalog(path: &Path) -> Result<Catalog, FixtureError> {
    if !path.exists() {
        return Err(FixtureError::NotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let fixture: CatalogFixture =
        serde_json::from_str(&content).map_err(|e| FixtureError::Parse {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(fixture.into_catalog())
}
