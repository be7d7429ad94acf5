//! Database schema definitions

/// SQL to create the bookmarks table
pub const CREATE_BOOKMARKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookmarks (
    id TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_BOOKMARKS_TABLE]
}
