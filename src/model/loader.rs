//! Loading and saving DataBox definitions.
//!
//! Definitions are TOML files. The loader validates against the built-in
//! converter registry after parsing.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::databox::{DataBox, DefinitionError};
use crate::convert::ConverterRegistry;

/// Errors that can occur when loading a definition.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported file extension: {extension}. Supported: .toml")]
    UnsupportedExtension { extension: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Invalid definition: {0}")]
    Validation(DefinitionError),
}

/// Result type for definition loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a definition from a `.toml` file.
pub fn load(path: &Path) -> LoadResult<DataBox> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension != "toml" {
        return Err(LoadError::UnsupportedExtension {
            extension: extension.to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    load_from_str(&content, &path.display().to_string())
}

/// Load a definition from a TOML string (useful for testing).
pub fn load_from_str(content: &str, filename: &str) -> LoadResult<DataBox> {
    let databox: DataBox = toml::from_str(content).map_err(|e| LoadError::Parse {
        file: filename.to_string(),
        message: e.to_string(),
    })?;

    let converters = ConverterRegistry::with_defaults();
    databox
        .validate(&converters)
        .map_err(|mut errors| LoadError::Validation(errors.remove(0)))?;

    Ok(databox)
}

/// Serialize a definition to TOML.
pub fn to_toml(databox: &DataBox) -> LoadResult<String> {
    toml::to_string_pretty(databox).map_err(|e| LoadError::Parse {
        file: databox.id.clone(),
        message: e.to_string(),
    })
}

/// Save a definition to a `.toml` file.
pub fn save(databox: &DataBox, path: &Path) -> LoadResult<()> {
    let content = to_toml(databox)?;
    fs::write(path, content)?;
    Ok(())
}
