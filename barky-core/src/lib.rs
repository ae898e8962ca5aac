//! Core types for the Barky bookmark API.
//!
//! Defines the three resource kinds (bookmarks, code snippets, users), their
//! field validation, and the in-process [`ResourceStore`] that enforces
//! identifier uniqueness and the snippet owner reference.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod bookmark;
pub mod error;
pub mod fixtures;
pub mod id;
pub mod resource;
pub mod snippet;
pub mod store;
pub mod user;
mod validate;

pub use bookmark::{Bookmark, BookmarkFields};
pub use error::{CoreError, StoreError};
pub use id::{BookmarkId, SnippetId, UserId};
pub use resource::{Record, ResourceKind};
pub use snippet::{Snippet, SnippetFields};
pub use store::{ResourceStore, StoreSnapshot};
pub use user::{NewUser, User, UserProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_kind_display_is_lowercase_singular() {
        assert_eq!(ResourceKind::Bookmark.to_string(), "bookmark");
        assert_eq!(ResourceKind::Snippet.to_string(), "snippet");
        assert_eq!(ResourceKind::User.to_string(), "user");
    }

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = match serde_json::to_string(&BookmarkId::new(42)) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "42");

        let id: SnippetId = match serde_json::from_str("7") {
            Ok(id) => id,
            Err(e) => panic!("deserialization failed: {e}"),
        };
        assert_eq!(id, SnippetId::new(7));
    }

    #[test]
    fn id_display_shows_inner_integer() {
        assert_eq!(UserId::new(3).to_string(), "3");
        assert_eq!(i64::from(BookmarkId::new(99)), 99);
    }

    #[test]
    fn store_error_display_names_kind_and_id() {
        let err = StoreError::NotFound {
            kind: ResourceKind::Bookmark,
            id: 5,
        };
        assert_eq!(err.to_string(), "bookmark 5 not found");

        let err = StoreError::IdSequenceExhausted {
            kind: ResourceKind::User,
        };
        assert_eq!(err.to_string(), "user id sequence exhausted");

        let err = StoreError::DuplicateIdentifier {
            kind: ResourceKind::User,
            key: "username 'allie'".to_owned(),
        };
        assert!(err.to_string().contains("allie"), "duplicate message must name the key");
    }

    #[test]
    fn core_error_converts_into_store_validation_error() {
        let core = CoreError::InvalidField {
            field: "title",
            reason: "must not be blank".to_owned(),
        };
        let store: StoreError = core.into();
        assert!(matches!(store, StoreError::Validation(_)));
        assert_eq!(store.to_string(), "invalid title: must not be blank");
    }
}
