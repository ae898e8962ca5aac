//! Fuzz target: JSON snippet bodies against a store holding one user.
//!
//! Only snippets owned by that user may be accepted.

#![no_main]

use barky_core::{NewUser, ResourceStore, Snippet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(snippet) = serde_json::from_slice::<Snippet>(data) else {
        return;
    };
    let store = ResourceStore::new();
    let owner = store.create_user(NewUser::new("allie")).expect("fixture user is valid");
    if store.create_snippet(snippet.clone()).is_ok() {
        assert_eq!(snippet.owner, owner.user.id, "snippet accepted with a dangling owner");
    }
});
