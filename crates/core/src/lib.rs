//! Domain types, validation, and the editable-page registry shared by every
//! crate in the workspace.
//!
//! This crate performs no I/O so it can be used from the repository layer,
//! the publishing workflow, and the HTTP server alike.

pub mod content;
pub mod error;
pub mod pages;
pub mod session;
pub mod types;
