//! Fuzz target: restoring a store from an arbitrary snapshot file.
//!
//! A snapshot that restores must export back to the same set of records.

#![no_main]

use barky_core::{ResourceStore, StoreSnapshot};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = serde_json::from_slice::<StoreSnapshot>(data) else {
        return;
    };
    let Ok(store) = ResourceStore::from_snapshot(snapshot.clone()) else {
        return;
    };
    let exported = store.snapshot();
    assert_eq!(exported.bookmarks.len(), snapshot.bookmarks.len());
    assert_eq!(exported.snippets.len(), snapshot.snippets.len());
    assert_eq!(exported.users.len(), snapshot.users.len());
});
