use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{SnippetId, UserId};
use crate::resource::{Record, ResourceKind};
use crate::validate;

fn default_language() -> String {
    "python".to_owned()
}

/// A piece of source code owned by a [`crate::User`].
///
/// The owner is a plain reference; the store guarantees it points at an
/// existing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Snippet {
    /// Client-chosen unique identifier.
    pub id: SnippetId,
    /// Optional label; empty when not given.
    #[serde(default)]
    pub title: String,
    /// Source text.
    pub code: String,
    /// Whether line numbers should be shown.
    #[serde(default)]
    pub linenos: bool,
    /// Source language tag, `"python"` when not given.
    #[serde(default = "default_language")]
    pub language: String,
    /// The user this snippet belongs to.
    pub owner: UserId,
}

impl Snippet {
    #[must_use]
    pub fn new(id: SnippetId, code: impl Into<String>, owner: UserId) -> Self {
        Self {
            id,
            title: String::new(),
            code: code.into(),
            linenos: false,
            language: default_language(),
            owner,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_linenos(mut self, linenos: bool) -> Self {
        self.linenos = linenos;
        self
    }

    /// Builds the record that results from replacing every field of `id`.
    #[must_use]
    pub fn from_fields(id: SnippetId, fields: SnippetFields) -> Self {
        let SnippetFields {
            title,
            code,
            linenos,
            language,
            owner,
        } = fields;
        Self {
            id,
            title,
            code,
            linenos,
            language,
            owner,
        }
    }
}

impl Record for Snippet {
    type Id = SnippetId;
    const KIND: ResourceKind = ResourceKind::Snippet;

    fn id(&self) -> SnippetId {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        validate::positive_id("id", self.id.0)?;
        validate::max_chars("title", &self.title, validate::SNIPPET_TITLE_MAX)?;
        validate::non_blank("code", &self.code)?;
        validate::language(&self.language)?;
        validate::positive_id("owner", self.owner.0)
    }
}

/// The replaceable fields of a [`Snippet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SnippetFields {
    #[serde(default)]
    pub title: String,
    pub code: String,
    #[serde(default)]
    pub linenos: bool,
    #[serde(default = "default_language")]
    pub language: String,
    pub owner: UserId,
}

impl SnippetFields {
    #[must_use]
    pub fn new(code: impl Into<String>, owner: UserId) -> Self {
        Self {
            title: String::new(),
            code: code.into(),
            linenos: false,
            language: default_language(),
            owner,
        }
    }
}
