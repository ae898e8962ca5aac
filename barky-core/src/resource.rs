//! The resource kinds served by the API and the trait the store keys them by.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named kind of persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ResourceKind {
    Bookmark,
    Snippet,
    User,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bookmark => "bookmark",
            Self::Snippet => "snippet",
            Self::User => "user",
        })
    }
}

/// A record the [`crate::ResourceStore`] can hold in one of its tables.
pub trait Record: Clone {
    /// Typed primary key, ordered so listings come back in id order.
    type Id: Copy + Ord + fmt::Display + Into<i64>;

    /// Which resource kind this record belongs to.
    const KIND: ResourceKind;

    /// The record's primary key.
    fn id(&self) -> Self::Id;

    /// Check every field of the record, including the id.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidField`] naming the first offending field.
    fn validate(&self) -> Result<(), CoreError>;
}
