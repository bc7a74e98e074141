//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the DTOs used to write it.

pub mod content_item;
pub mod page_draft;
pub mod status;
