//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - bookmarks(id, url, title, description, created_at)

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;
