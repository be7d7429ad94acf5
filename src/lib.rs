//! # Bookmarks - a small CRUD API for saved URLs
//!
//! Bookmarks provides:
//! - A single `Bookmark` record type with validated create/update payloads
//! - SQLite-backed storage with one table and one shared connection
//! - An axum HTTP layer mapping each operation to one verb and route

pub mod bookmark;
pub mod storage;
pub mod server;
pub mod config;

// Re-exports for convenient access
pub use bookmark::{Bookmark, BookmarkUpdate, FieldError, NewBookmark};
pub use storage::SqliteStore;

/// Result type alias for Bookmarks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bookmarks operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Config already exists at {} (use --force to overwrite)", .0.display())]
    ConfigExists(std::path::PathBuf),
}
