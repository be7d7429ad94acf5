//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::bookmark::{Bookmark, BookmarkUpdate};
use super::schema;

const SELECT_COLUMNS: &str = "SELECT id, url, title, description, created_at FROM bookmarks";

/// SQLite-backed storage for bookmarks
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Insert a new bookmark. Fails if the id is already taken.
    pub fn create(&self, bookmark: &Bookmark) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO bookmarks (id, url, title, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                bookmark.id,
                bookmark.url,
                bookmark.title,
                bookmark.description,
                bookmark.created_at,
            ],
        )?;
        Ok(())
    }

    /// Every stored bookmark, oldest first
    pub fn get_all(&self) -> Result<Vec<Bookmark>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at, rowid"))?;

        let bookmarks = stmt
            .query_map([], row_to_bookmark)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(bookmarks)
    }

    /// Get a bookmark by id
    pub fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                [id],
                row_to_bookmark,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Merge `update` over the stored row and write it back.
    ///
    /// Returns the merged bookmark.
    pub fn update(&self, id: &str, update: &BookmarkUpdate) -> Result<Bookmark> {
        let mut bookmark = self
            .get_by_id(id)?
            .ok_or_else(|| Error::BookmarkNotFound(id.to_string()))?;

        if update.is_empty() {
            return Ok(bookmark);
        }
        bookmark.merge(update);

        let changed = self.conn.execute(
            "UPDATE bookmarks SET url = ?2, title = ?3, description = ?4 WHERE id = ?1",
            params![bookmark.id, bookmark.url, bookmark.title, bookmark.description],
        )?;
        if changed == 0 {
            return Err(Error::BookmarkNotFound(id.to_string()));
        }
        Ok(bookmark)
    }

    /// Hard-delete a bookmark
    pub fn delete(&self, id: &str) -> Result<()> {
        let deleted = self.conn.execute("DELETE FROM bookmarks WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(Error::BookmarkNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Count all bookmarks
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
    Ok(Bookmark {
        id: row.get(0)?,
        url: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
    })
}
