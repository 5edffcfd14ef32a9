//! User catalog configuration
//!
//! Additional cone search endpoints can be registered without rebuilding by
//! listing them in ~/.conesearch/catalogs.json, a JSON array of catalog
//! entries. Entries with a builtin name replace the builtin.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalogs::{CatalogEntry, CatalogRegistry};

/// Errors raised while loading the user catalog file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed catalog file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Locator for user configuration (defaults to ~/.conesearch)
#[derive(Debug, Clone)]
pub struct UserConfig {
    root_path: PathBuf,
}

impl UserConfig {
    /// Create a config locator rooted at ~/.conesearch
    pub fn new() -> std::io::Result<Self> {
        let home = std::env::var("HOME")
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
        let root_path = PathBuf::from(home).join(".conesearch");
        Ok(Self { root_path })
    }

    /// Create a config locator with a custom root path
    pub fn with_path(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Get the root configuration path
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Path of the user catalog file
    pub fn catalogs_file(&self) -> PathBuf {
        self.root_path.join("catalogs.json")
    }

    /// Load user catalog entries.
    ///
    /// A missing file is not an error; it simply contributes no entries.
    pub fn load_catalogs(&self) -> Result<Vec<CatalogEntry>, ConfigError> {
        let path = self.catalogs_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Malformed { path, source })
    }
}

/// Build the effective registry: builtin catalogs with user entries merged
/// on top
pub fn load_registry(config: &UserConfig) -> Result<CatalogRegistry, ConfigError> {
    let mut registry = CatalogRegistry::builtin();
    let user_entries = config.load_catalogs()?;
    if !user_entries.is_empty() {
        log::debug!(
            "Merging {} user catalog entries from {}",
            user_entries.len(),
            config.catalogs_file().display()
        );
        registry.merge(user_entries);
    }
    Ok(registry)
}
