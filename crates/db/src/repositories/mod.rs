//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod content_repo;
pub mod page_draft_repo;

pub use content_repo::ContentRepo;
pub use page_draft_repo::PageDraftRepo;
