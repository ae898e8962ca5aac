use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::BookmarkId;
use crate::resource::{Record, ResourceKind};
use crate::validate;

/// A saved link with a label and free-text notes.
///
/// Created from a full client-supplied record, id included, and only ever
/// changed by replacing every field at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Bookmark {
    /// Client-chosen unique identifier.
    pub id: BookmarkId,
    /// Human-readable label.
    pub title: String,
    /// The bookmarked address.
    pub url: String,
    /// Free-text annotation, possibly empty.
    #[serde(default)]
    pub notes: String,
}

impl Bookmark {
    #[must_use]
    pub fn new(
        id: BookmarkId,
        title: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            notes: notes.into(),
        }
    }

    /// Builds the record that results from replacing every field of `id`.
    #[must_use]
    pub fn from_fields(id: BookmarkId, fields: BookmarkFields) -> Self {
        let BookmarkFields { title, url, notes } = fields;
        Self {
            id,
            title,
            url,
            notes,
        }
    }
}

impl Record for Bookmark {
    type Id = BookmarkId;
    const KIND: ResourceKind = ResourceKind::Bookmark;

    fn id(&self) -> BookmarkId {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        validate::positive_id("id", self.id.0)?;
        validate::non_blank("title", &self.title)?;
        validate::max_chars("title", &self.title, validate::BOOKMARK_TITLE_MAX)?;
        validate::http_url("url", &self.url)
    }
}

/// The replaceable fields of a [`Bookmark`], i.e. the body of a full update.
///
/// An `id` present in an update body is ignored; the path id wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BookmarkFields {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub notes: String,
}

impl BookmarkFields {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            notes: notes.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn awesome_django() -> Bookmark {
        Bookmark::new(
            BookmarkId::new(1),
            "Awesome Django",
            "https://awesomedjango.org/",
            "Best place on the web for Django.",
        )
    }

    #[test]
    fn valid_bookmark_passes_validation() {
        assert!(awesome_django().validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut bookmark = awesome_django();
        bookmark.title = "   ".to_owned();
        match bookmark.validate() {
            Err(CoreError::InvalidField { field, .. }) => assert_eq!(field, "title"),
            other => panic!("expected title error, got {other:?}"),
        }
    }

    #[test]
    fn non_http_url_is_rejected() {
        let mut bookmark = awesome_django();
        bookmark.url = "awesomedjango.org".to_owned();
        match bookmark.validate() {
            Err(CoreError::InvalidField { field, .. }) => assert_eq!(field, "url"),
            other => panic!("expected url error, got {other:?}"),
        }
    }

    #[test]
    fn zero_id_is_rejected() {
        let mut bookmark = awesome_django();
        bookmark.id = BookmarkId::new(0);
        assert!(bookmark.validate().is_err(), "ids start at 1");
    }

    #[test]
    fn notes_default_to_empty_when_absent() {
        let json = r#"{"id": 3, "title": "Rust", "url": "https://www.rust-lang.org/"}"#;
        let bookmark: Bookmark = match serde_json::from_str(json) {
            Ok(b) => b,
            Err(e) => panic!("deserialization failed: {e}"),
        };
        assert_eq!(bookmark.notes, "");
        assert!(bookmark.validate().is_ok());
    }

    #[test]
    fn missing_url_fails_to_deserialize() {
        let json = r#"{"id": 3, "title": "Rust"}"#;
        assert!(serde_json::from_str::<Bookmark>(json).is_err());
    }

    #[test]
    fn update_body_ignores_id() {
        let json = r#"{
            "id": 99,
            "title": "Awesomer Django",
            "url": "https://awesomedjango.org/",
            "notes": "Best place on the web for Django just got better."
        }"#;
        let fields: BookmarkFields = match serde_json::from_str(json) {
            Ok(f) => f,
            Err(e) => panic!("deserialization failed: {e}"),
        };
        let replaced = Bookmark::from_fields(BookmarkId::new(1), fields);
        assert_eq!(replaced.id, BookmarkId::new(1));
        assert_eq!(replaced.title, "Awesomer Django");
    }
}
