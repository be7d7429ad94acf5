use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "bookmarks.db";

/// Contents of `bookmarks.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BookmarksConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved settings the server runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database: PathBuf,
    pub port: u16,
}

impl ServerConfig {
    /// Layer explicit values (CLI flag or environment) over the config file,
    /// then fall back to the built-in defaults.
    pub fn resolve(
        port: Option<u16>,
        database: Option<PathBuf>,
        file: Option<&BookmarksConfig>,
    ) -> Self {
        let port = port
            .or_else(|| file.and_then(|c| c.port))
            .unwrap_or(DEFAULT_PORT);
        let database = database
            .or_else(|| file.and_then(|c| c.database.as_ref().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));
        Self { database, port }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

impl From<&ServerConfig> for BookmarksConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            database: Some(config.database.to_string_lossy().into_owned()),
            port: Some(config.port),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bookmarks.toml")
}

/// Read the config file, treating a missing file as "no config".
pub fn load_config(path: Option<&Path>) -> Result<Option<BookmarksConfig>> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(toml::from_str(&contents)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Write `config` as TOML. An existing file is only replaced with `force`.
pub fn write_config(path: &Path, config: &BookmarksConfig, force: bool) -> Result<()> {
    match (path.exists(), force) {
        (true, false) => Err(Error::ConfigExists(path.to_path_buf())),
        _ => {
            std::fs::write(path, toml::to_string_pretty(config)?)?;
            Ok(())
        }
    }
}

/// Create the directory the database file lives in.
pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(())
}
