//! In-process resource store.
//!
//! Holds one table per resource kind behind a single `RwLock`, so every
//! operation observes and leaves behind a consistent store: ids unique per
//! kind, usernames unique, and every snippet owner pointing at a live user.

use std::{
    collections::BTreeMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bookmark::{Bookmark, BookmarkFields};
use crate::error::StoreError;
use crate::fixtures;
use crate::id::{BookmarkId, SnippetId, UserId};
use crate::resource::{Record, ResourceKind};
use crate::snippet::{Snippet, SnippetFields};
use crate::user::{NewUser, User, UserProfile};

/// Records of one kind keyed by id.
#[derive(Debug)]
struct Table<R: Record> {
    rows: BTreeMap<R::Id, R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Record> Table<R> {
    fn not_found(id: R::Id) -> StoreError {
        StoreError::NotFound {
            kind: R::KIND,
            id: id.into(),
        }
    }

    fn list(&self) -> Vec<R> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: R::Id) -> Result<&R, StoreError> {
        self.rows.get(&id).ok_or_else(|| Self::not_found(id))
    }

    fn contains(&self, id: R::Id) -> bool {
        self.rows.contains_key(&id)
    }

    fn insert(&mut self, record: R) -> Result<R, StoreError> {
        let id = record.id();
        if self.rows.contains_key(&id) {
            return Err(StoreError::DuplicateIdentifier {
                kind: R::KIND,
                key: format!("id {id}"),
            });
        }
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    fn replace(&mut self, record: R) -> Result<R, StoreError> {
        let slot = self
            .rows
            .get_mut(&record.id())
            .ok_or_else(|| Self::not_found(record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    fn remove(&mut self, id: R::Id) -> Result<R, StoreError> {
        self.rows.remove(&id).ok_or_else(|| Self::not_found(id))
    }
}

#[derive(Debug, Default)]
struct Tables {
    bookmarks: Table<Bookmark>,
    snippets: Table<Snippet>,
    users: Table<User>,
    /// Highest user id ever handed out; ids are not reused after deletion.
    last_user_id: i64,
}

impl Tables {
    fn next_user_id(&self) -> Result<UserId, StoreError> {
        self.last_user_id
            .checked_add(1)
            .map(UserId::new)
            .ok_or(StoreError::IdSequenceExhausted {
                kind: ResourceKind::User,
            })
    }

    fn require_owner(&self, owner: UserId) -> Result<(), StoreError> {
        if self.users.contains(owner) {
            return Ok(());
        }
        Err(StoreError::ReferentialFailure {
            kind: ResourceKind::Snippet,
            field: "owner",
            target: ResourceKind::User,
            id: owner.into(),
        })
    }

    fn require_free_username(
        &self,
        username: &str,
        except: Option<UserId>,
    ) -> Result<(), StoreError> {
        let taken = self
            .users
            .rows
            .values()
            .any(|u| u.username == username && Some(u.id) != except);
        if taken {
            return Err(StoreError::DuplicateIdentifier {
                kind: ResourceKind::User,
                key: format!("username '{username}'"),
            });
        }
        Ok(())
    }

    fn owned_snippets(&self, owner: UserId) -> Vec<SnippetId> {
        self.snippets
            .rows
            .values()
            .filter(|s| s.owner == owner)
            .map(|s| s.id)
            .collect()
    }

    fn profile(&self, user: &User) -> UserProfile {
        UserProfile::new(user.clone(), self.owned_snippets(user.id))
    }

    fn insert_user(&mut self, user: User) -> Result<User, StoreError> {
        user.validate()?;
        self.require_free_username(&user.username, None)?;
        let user = self.users.insert(user)?;
        self.last_user_id = self.last_user_id.max(user.id.0);
        Ok(user)
    }

    fn insert_snippet(&mut self, snippet: Snippet) -> Result<Snippet, StoreError> {
        snippet.validate()?;
        self.require_owner(snippet.owner)?;
        self.snippets.insert(snippet)
    }
}

/// Serializable export of an entire [`ResourceStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StoreSnapshot {
    pub bookmarks: Vec<Bookmark>,
    pub snippets: Vec<Snippet>,
    pub users: Vec<User>,
    /// Highest user id ever assigned, so deleted ids stay retired.
    #[serde(default)]
    pub last_user_id: i64,
}

/// Thread-safe store for bookmarks, snippets and users.
///
/// # Panics
/// Every method panics if the internal `RwLock` is poisoned (a previous
/// thread panicked while holding the write lock).
#[derive(Debug, Default)]
pub struct ResourceStore {
    tables: RwLock<Tables>,
}

impl ResourceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("resource store read lock poisoned")
    }

    #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("resource store write lock poisoned")
    }

    /// Number of records of the given kind.
    #[must_use]
    pub fn count(&self, kind: ResourceKind) -> usize {
        let tables = self.read();
        match kind {
            ResourceKind::Bookmark => tables.bookmarks.rows.len(),
            ResourceKind::Snippet => tables.snippets.rows.len(),
            ResourceKind::User => tables.users.rows.len(),
        }
    }

    // ── Bookmarks ────────────────────────────────────────────────────────────

    /// All bookmarks in ascending id order.
    #[must_use]
    pub fn list_bookmarks(&self) -> Vec<Bookmark> {
        self.read().bookmarks.list()
    }

    /// Insert a full bookmark record.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] for malformed fields and
    /// [`StoreError::DuplicateIdentifier`] if the id is already in use.
    pub fn create_bookmark(&self, bookmark: Bookmark) -> Result<Bookmark, StoreError> {
        bookmark.validate()?;
        let created = self.write().bookmarks.insert(bookmark)?;
        debug!(kind = %ResourceKind::Bookmark, id = %created.id, "created");
        Ok(created)
    }

    /// # Errors
    /// Returns [`StoreError::NotFound`] if no bookmark has this id.
    pub fn retrieve_bookmark(&self, id: BookmarkId) -> Result<Bookmark, StoreError> {
        self.read().bookmarks.get(id).cloned()
    }

    /// Replace every field of an existing bookmark.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no bookmark has this id and
    /// [`StoreError::Validation`] for malformed fields.
    pub fn update_bookmark(
        &self,
        id: BookmarkId,
        fields: BookmarkFields,
    ) -> Result<Bookmark, StoreError> {
        let bookmark = Bookmark::from_fields(id, fields);
        let mut tables = self.write();
        tables.bookmarks.get(id)?;
        bookmark.validate()?;
        let updated = tables.bookmarks.replace(bookmark)?;
        debug!(kind = %ResourceKind::Bookmark, %id, "replaced");
        Ok(updated)
    }

    /// # Errors
    /// Returns [`StoreError::NotFound`] if no bookmark has this id.
    pub fn delete_bookmark(&self, id: BookmarkId) -> Result<(), StoreError> {
        self.write().bookmarks.remove(id)?;
        debug!(kind = %ResourceKind::Bookmark, %id, "deleted");
        Ok(())
    }

    // ── Snippets ─────────────────────────────────────────────────────────────

    /// All snippets in ascending id order.
    #[must_use]
    pub fn list_snippets(&self) -> Vec<Snippet> {
        self.read().snippets.list()
    }

    /// Insert a full snippet record.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] for malformed fields,
    /// [`StoreError::DuplicateIdentifier`] if the id is in use, and
    /// [`StoreError::ReferentialFailure`] if the owner does not exist.
    pub fn create_snippet(&self, snippet: Snippet) -> Result<Snippet, StoreError> {
        let created = self.write().insert_snippet(snippet)?;
        debug!(
            kind = %ResourceKind::Snippet,
            id = %created.id,
            owner = %created.owner,
            "created"
        );
        Ok(created)
    }

    /// # Errors
    /// Returns [`StoreError::NotFound`] if no snippet has this id.
    pub fn retrieve_snippet(&self, id: SnippetId) -> Result<Snippet, StoreError> {
        self.read().snippets.get(id).cloned()
    }

    /// Replace every field of an existing snippet, owner included.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no snippet has this id,
    /// [`StoreError::Validation`] for malformed fields, and
    /// [`StoreError::ReferentialFailure`] if the new owner does not exist.
    pub fn update_snippet(
        &self,
        id: SnippetId,
        fields: SnippetFields,
    ) -> Result<Snippet, StoreError> {
        let snippet = Snippet::from_fields(id, fields);
        let mut tables = self.write();
        tables.snippets.get(id)?;
        snippet.validate()?;
        tables.require_owner(snippet.owner)?;
        let updated = tables.snippets.replace(snippet)?;
        debug!(kind = %ResourceKind::Snippet, %id, "replaced");
        Ok(updated)
    }

    /// # Errors
    /// Returns [`StoreError::NotFound`] if no snippet has this id.
    pub fn delete_snippet(&self, id: SnippetId) -> Result<(), StoreError> {
        self.write().snippets.remove(id)?;
        debug!(kind = %ResourceKind::Snippet, %id, "deleted");
        Ok(())
    }

    // ── Users ────────────────────────────────────────────────────────────────

    /// All users in ascending id order, each with the snippets it owns.
    #[must_use]
    pub fn list_users(&self) -> Vec<UserProfile> {
        let tables = self.read();
        tables.users.rows.values().map(|u| tables.profile(u)).collect()
    }

    /// Register a user under the next free id.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] for a malformed username,
    /// [`StoreError::DuplicateIdentifier`] if the username is taken, and
    /// [`StoreError::IdSequenceExhausted`] once the id sequence hits `i64::MAX`.
    pub fn create_user(&self, new_user: NewUser) -> Result<UserProfile, StoreError> {
        new_user.validate()?;
        let mut tables = self.write();
        let user = User {
            id: tables.next_user_id()?,
            username: new_user.username,
            date_joined: Utc::now(),
        };
        let created = tables.insert_user(user)?;
        debug!(
            kind = %ResourceKind::User,
            id = %created.id,
            username = %created.username,
            "created"
        );
        Ok(UserProfile::new(created, Vec::new()))
    }

    /// # Errors
    /// Returns [`StoreError::NotFound`] if no user has this id.
    pub fn retrieve_user(&self, id: UserId) -> Result<UserProfile, StoreError> {
        let tables = self.read();
        let user = tables.users.get(id)?;
        Ok(tables.profile(user))
    }

    /// Replace the username of an existing user; id and join date are kept.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no user has this id,
    /// [`StoreError::Validation`] for a malformed username, and
    /// [`StoreError::DuplicateIdentifier`] if another user has the username.
    pub fn update_user(&self, id: UserId, fields: NewUser) -> Result<UserProfile, StoreError> {
        let mut tables = self.write();
        let mut user = tables.users.get(id)?.clone();
        fields.validate()?;
        tables.require_free_username(&fields.username, Some(id))?;
        user.username = fields.username;
        let updated = tables.users.replace(user)?;
        debug!(kind = %ResourceKind::User, %id, "replaced");
        Ok(tables.profile(&updated))
    }

    /// Delete a user together with every snippet it owns.
    ///
    /// Returns the number of snippets removed along with the user.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no user has this id.
    pub fn delete_user(&self, id: UserId) -> Result<usize, StoreError> {
        let mut tables = self.write();
        tables.users.remove(id)?;
        let before = tables.snippets.rows.len();
        tables.snippets.rows.retain(|_, s| s.owner != id);
        let cascaded = before - tables.snippets.rows.len();
        if cascaded > 0 {
            info!(
                kind = %ResourceKind::User,
                %id,
                snippets = cascaded,
                "deleted with owned snippets"
            );
        } else {
            debug!(kind = %ResourceKind::User, %id, "deleted");
        }
        Ok(cascaded)
    }

    // ── Snapshots ────────────────────────────────────────────────────────────

    /// Export every record and the user id sequence.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let tables = self.read();
        StoreSnapshot {
            bookmarks: tables.bookmarks.list(),
            snippets: tables.snippets.list(),
            users: tables.users.list(),
            last_user_id: tables.last_user_id,
        }
    }

    /// Rebuild a store from a snapshot, re-checking every invariant.
    ///
    /// # Errors
    /// Returns [`StoreError::CorruptSnapshot`] describing the first record
    /// that is invalid, duplicated, or refers to a missing owner.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let corrupt = |e: StoreError| StoreError::CorruptSnapshot {
            reason: e.to_string(),
        };
        let mut tables = Tables {
            last_user_id: snapshot.last_user_id,
            ..Tables::default()
        };
        for user in snapshot.users {
            tables.insert_user(user).map_err(corrupt)?;
        }
        for bookmark in snapshot.bookmarks {
            bookmark.validate().map_err(|e| corrupt(e.into()))?;
            tables.bookmarks.insert(bookmark).map_err(corrupt)?;
        }
        for snippet in snapshot.snippets {
            tables.insert_snippet(snippet).map_err(corrupt)?;
        }
        info!(
            bookmarks = tables.bookmarks.rows.len(),
            snippets = tables.snippets.rows.len(),
            users = tables.users.rows.len(),
            "store restored from snapshot"
        );
        Ok(Self {
            tables: RwLock::new(tables),
        })
    }

    /// Load the example user, bookmark and snippet into an empty store.
    ///
    /// Returns `false` without touching anything if the store already holds
    /// records of any kind.
    ///
    /// # Errors
    /// Propagates any store error from inserting the fixtures.
    pub fn seed_examples(&self) -> Result<bool, StoreError> {
        let populated = [ResourceKind::Bookmark, ResourceKind::Snippet, ResourceKind::User]
            .into_iter()
            .any(|kind| self.count(kind) > 0);
        if populated {
            return Ok(false);
        }
        let owner = self.create_user(fixtures::example_user())?;
        self.create_bookmark(fixtures::example_bookmark())?;
        self.create_snippet(fixtures::example_snippet(owner.user.id))?;
        info!("seeded example records");
        Ok(true)
    }
}
