//! Fuzz target: JSON bookmark bodies through deserialization and the store.
//!
//! Whatever the input, parsing and `create_bookmark` must return an error
//! rather than panic, and an accepted record must read back unchanged.

#![no_main]

use barky_core::{Bookmark, ResourceStore};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(bookmark) = serde_json::from_slice::<Bookmark>(data) else {
        return;
    };
    let store = ResourceStore::new();
    if store.create_bookmark(bookmark.clone()).is_ok() {
        let stored = store
            .retrieve_bookmark(bookmark.id)
            .expect("accepted bookmark must be stored");
        assert_eq!(stored, bookmark);
    }
});
