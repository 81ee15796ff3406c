//! TOML-based configuration.
//!
//! Supports a config file (databox.toml) with environment variable
//! expansion in string values.
//!
//! Example configuration:
//! ```toml
//! store_root = "${HOME}/cms-site"
//!
//! [listing]
//! default_limit = 100
//!
//! [export]
//! csv_delimiter = ","
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the databoxes folder.
    pub store_root: Option<String>,

    pub listing: ListingSettings,

    pub export: ExportSettings,
}

/// Listing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Result limit applied to boxes without one, 0 for unlimited.
    pub default_limit: usize,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self { default_limit: 0 }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSettings {
    pub csv_delimiter: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            csv_delimiter: ",".to_string(),
        }
    }
}

impl Settings {
    /// Load settings, trying the `DATABOX_CONFIG` environment variable
    /// first, then `databox.toml` in the working directory. A missing
    /// file yields the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("DATABOX_CONFIG") {
            return Self::from_file(Path::new(&path));
        }

        let local_config = PathBuf::from("databox.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        Ok(Self::default())
    }

    /// Load settings from a specific file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The store root with environment variables expanded.
    pub fn resolved_store_root(&self) -> Result<Option<PathBuf>, SettingsError> {
        match &self.store_root {
            Some(root) => Ok(Some(PathBuf::from(expand_env_vars(root)?))),
            None => Ok(None),
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            if chars.peek() == Some(&'{') {
                chars.next();
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch == '}' {
                        chars.next();
                        break;
                    }
                    var_name.push(ch);
                    chars.next();
                }
                let value = env::var(&var_name)
                    .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                result.push_str(&value);
            } else {
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        var_name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if var_name.is_empty() {
                    result.push('$');
                } else {
                    let value = env::var(&var_name)
                        .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                    result.push_str(&value);
                }
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}
