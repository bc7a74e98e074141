//! Draft and publish workflow for page content.
//!
//! - [`store`] -- Storage traits for live content and page drafts.
//! - [`postgres`] -- Store implementations over the repository layer.
//! - [`memory`] -- In-process stores for tests and local development.
//! - [`content`] -- Content store accessor used by public pages and admins.
//! - [`manager`] -- Draft versioning, publish, restore, and diff.
//! - [`editor`] -- Visual editor controller with local edit buffering.

pub mod content;
pub mod editor;
pub mod error;
pub mod manager;
pub mod memory;
pub mod postgres;
pub mod store;

pub use content::ContentService;
pub use editor::VisualEditor;
pub use error::PublishError;
pub use manager::DraftManager;
pub use store::{ContentStore, DraftStore, StoreError};
