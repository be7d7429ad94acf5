//! Bookmark records and the request payloads that create or change them
//!
//! A bookmark is the only persisted entity: a URL with a title, an optional
//! description, and server-assigned `id` / `created_at` values.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// A saved URL with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    /// Server-generated identifier (UUID v4), never changes
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    /// RFC 3339 UTC timestamp, set once at creation
    pub created_at: String,
}

impl Bookmark {
    /// Create a new bookmark with a fresh id and the current timestamp
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            title: title.into(),
            description: None,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overwrite the fields present in `update`, keeping everything else.
    ///
    /// `id` and `created_at` are never touched.
    pub fn merge(&mut self, update: &BookmarkUpdate) {
        if let Some(url) = &update.url {
            self.url = url.clone();
        }
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
    }
}

/// Body of `POST /bookmarks`.
///
/// Fields are optional at the type level so that a missing `url` or `title`
/// is reported as a field error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewBookmark {
    #[validate(
        required(message = "URL is required"),
        url(message = "URL must be a valid URL")
    )]
    pub url: Option<String>,
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewBookmark {
    /// Turn a validated payload into a fresh record.
    pub fn into_bookmark(self) -> Bookmark {
        let bookmark = Bookmark::new(
            self.url.unwrap_or_default(),
            self.title.unwrap_or_default(),
        );
        match self.description {
            Some(description) => bookmark.with_description(description),
            None => bookmark,
        }
    }
}

/// Body of `PUT /bookmarks/{id}`: every field is optional and only the
/// supplied ones are applied.
///
/// `url` and `title` cannot be cleared, so an explicit `null` for either is
/// the same as leaving the key out.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookmarkUpdate {
    #[validate(url(message = "URL must be a valid URL"))]
    pub url: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    /// `None` leaves the description alone, `Some(None)` clears it
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

impl BookmarkUpdate {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none() && self.description.is_none()
    }
}

/// Rejects titles that are empty or only whitespace.
fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("Title cannot be empty"));
        return Err(err);
    }
    Ok(())
}

/// Distinguishes an explicit `null` from an absent key.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A single input problem reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten validator output into a field-sorted list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bookmark(url: Option<&str>, title: Option<&str>) -> NewBookmark {
        NewBookmark {
            url: url.map(String::from),
            title: title.map(String::from),
            description: None,
        }
    }

    fn failing_fields(errors: &ValidationErrors) -> Vec<String> {
        field_errors(errors).into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_new_bookmark() {
        let input = new_bookmark(Some("https://example.com/a?b=c"), Some("Example"));
        assert!(input.validate().is_ok());

        let bookmark = input.into_bookmark();
        assert_eq!(bookmark.url, "https://example.com/a?b=c");
        assert_eq!(bookmark.title, "Example");
        assert_eq!(bookmark.description, None);
        assert!(!bookmark.id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&bookmark.created_at).is_ok());
    }

    #[test]
    fn test_malformed_url_rejected() {
        let errors = new_bookmark(Some("not-a-url"), Some("Example"))
            .validate()
            .unwrap_err();
        assert_eq!(failing_fields(&errors), vec!["url"]);
    }

    #[test]
    fn test_empty_title_rejected() {
        let errors = new_bookmark(Some("https://example.com"), Some(""))
            .validate()
            .unwrap_err();
        let list = field_errors(&errors);
        assert_eq!(list, vec![FieldError::new("title", "Title cannot be empty")]);
    }

    #[test]
    fn test_whitespace_title_rejected() {
        let errors = new_bookmark(Some("https://example.com"), Some(" \t\n "))
            .validate()
            .unwrap_err();
        assert_eq!(failing_fields(&errors), vec!["title"]);

        let update = BookmarkUpdate {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(failing_fields(&update.validate().unwrap_err()), vec!["title"]);

        let padded = new_bookmark(Some("https://example.com"), Some("  Rust  "));
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn test_null_url_and_title_leave_fields_alone() {
        let update: BookmarkUpdate = serde_json::from_str(r#"{"url":null,"title":null}"#).unwrap();
        assert!(update.validate().is_ok());
        assert!(update.is_empty());
    }

    #[test]
    fn test_description_carried_into_record() {
        let input = NewBookmark {
            description: Some("notes".into()),
            ..new_bookmark(Some("https://example.com"), Some("Example"))
        };
        assert_eq!(input.into_bookmark().description.as_deref(), Some("notes"));
    }

    #[test]
    fn test_missing_fields_reported_in_field_order() {
        let errors = new_bookmark(None, None).validate().unwrap_err();
        assert_eq!(failing_fields(&errors), vec!["title", "url"]);
    }

    #[test]
    fn test_update_validation() {
        assert!(BookmarkUpdate::default().validate().is_ok());

        let update = BookmarkUpdate {
            url: Some("nope".into()),
            title: Some(String::new()),
            description: None,
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(failing_fields(&errors), vec!["title", "url"]);
    }

    #[test]
    fn test_update_description_presence() {
        let absent: BookmarkUpdate = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(absent.description, None);

        let cleared: BookmarkUpdate = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: BookmarkUpdate = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert_eq!(set.description, Some(Some("x".to_string())));
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let mut bookmark = Bookmark::new("https://a.example", "A").with_description("first");
        let original = bookmark.clone();

        bookmark.merge(&BookmarkUpdate {
            description: Some(Some("x".into())),
            ..Default::default()
        });
        assert_eq!(bookmark.url, original.url);
        assert_eq!(bookmark.title, original.title);
        assert_eq!(bookmark.description.as_deref(), Some("x"));

        bookmark.merge(&BookmarkUpdate {
            url: Some("https://b.example".into()),
            description: Some(None),
            ..Default::default()
        });
        assert_eq!(bookmark.url, "https://b.example");
        assert_eq!(bookmark.description, None);
        assert_eq!(bookmark.id, original.id);
        assert_eq!(bookmark.created_at, original.created_at);
    }
}
