use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable naming the store location
pub const DB_PATH_ENV: &str = "DB_PATH";

/// Contents of an optional `bookmarks-mcp.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub database: Option<String>,
}

/// Validated gateway configuration. Resolved once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    database: PathBuf,
}

impl GatewayConfig {
    pub fn new(database: impl Into<PathBuf>) -> Result<Self> {
        let config = Self { database: database.into() };
        config.validate()?;
        Ok(config)
    }

    /// Resolve the store location: an explicit value (CLI flag or `DB_PATH`)
    /// wins over the config file.
    pub fn resolve(explicit: Option<PathBuf>, config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::new(path);
        }

        match load_config(config_file)?.and_then(|c| c.database) {
            Some(database) => Self::new(database),
            None => Err(Error::Configuration(format!(
                "{DB_PATH_ENV} environment variable must be set"
            ))),
        }
    }

    /// Reject an unusable location. Safe to call any number of times.
    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(Error::Configuration(format!(
                "{DB_PATH_ENV} must name a database file, got an empty path"
            )));
        }
        Ok(())
    }

    pub fn database(&self) -> &Path {
        &self.database
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bookmarks-mcp.toml")
}

pub fn load_config(path: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}
