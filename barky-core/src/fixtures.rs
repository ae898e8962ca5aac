//! Example records used to seed a fresh store and in tests.
//!
//! The snippet refers to the example user, so the user has to be created
//! first and its assigned id passed to [`example_snippet`].

use crate::bookmark::Bookmark;
use crate::id::{BookmarkId, SnippetId, UserId};
use crate::snippet::Snippet;
use crate::user::NewUser;

/// The canonical example user, `allie`.
#[must_use]
pub fn example_user() -> NewUser {
    NewUser::new("allie")
}

/// Bookmark 1, pointing at Awesome Django.
#[must_use]
pub fn example_bookmark() -> Bookmark {
    Bookmark::new(
        BookmarkId::new(1),
        "Awesome Django",
        "https://awesomedjango.org/",
        "Best place on the web for Django.",
    )
}

/// Snippet 1, a Python hello-world owned by `owner`.
#[must_use]
pub fn example_snippet(owner: UserId) -> Snippet {
    Snippet::new(SnippetId::new(1), "print(\"hello, world\")\n", owner)
}
