use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{SnippetId, UserId};
use crate::resource::{Record, ResourceKind};
use crate::validate;

/// An account that can own snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// When the store first accepted this user.
    pub date_joined: DateTime<Utc>,
}

impl Record for User {
    type Id = UserId;
    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> UserId {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        validate::positive_id("id", self.id.0)?;
        validate::username(&self.username)
    }
}

/// Body of a user create or full update. Any client-sent `id` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NewUser {
    pub username: String,
}

impl NewUser {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// # Errors
    /// Returns [`CoreError::InvalidField`] if the username is empty, too long,
    /// or contains characters outside letters, digits and `@.+-_`.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::username(&self.username)
    }
}

/// A user as the API represents it: the stored record plus the ids of the
/// snippets that reference it, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub snippets: Vec<SnippetId>,
}

impl UserProfile {
    #[must_use]
    pub fn new(user: User, snippets: Vec<SnippetId>) -> Self {
        Self { user, snippets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_flat_with_snippet_ids() {
        let user = User {
            id: UserId::new(1),
            username: "allie".to_owned(),
            date_joined: DateTime::<Utc>::UNIX_EPOCH,
        };
        let profile = UserProfile::new(user, vec![SnippetId::new(1), SnippetId::new(4)]);
        let value = match serde_json::to_value(&profile) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(value["id"], 1);
        assert_eq!(value["username"], "allie");
        assert_eq!(value["snippets"], serde_json::json!([1, 4]));
        assert!(value.get("user").is_none(), "user fields must be flattened");
    }

    #[test]
    fn new_user_body_ignores_client_id() {
        let body: NewUser = match serde_json::from_str(r#"{"id": 2, "username": "eric"}"#) {
            Ok(b) => b,
            Err(e) => panic!("deserialization failed: {e}"),
        };
        assert_eq!(body, NewUser::new("eric"));
        assert!(body.validate().is_ok());
    }

    #[test]
    fn invalid_username_is_rejected() {
        assert!(NewUser::new("not allowed!").validate().is_err());
    }
}
