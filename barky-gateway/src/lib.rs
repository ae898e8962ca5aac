//! HTTP API for the Barky bookmark store.
//!
//! Exposes list/create/retrieve/update/delete endpoints for bookmarks,
//! snippets and users over a shared [`barky_core::ResourceStore`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod extract;
pub mod persist;
pub mod routes;
