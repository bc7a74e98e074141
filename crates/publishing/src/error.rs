use serde::Serialize;
use wedsite_core::error::CoreError;
use wedsite_core::types::DbId;

use crate::store::StoreError;

/// A content key that could not be written during a publish fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFailure {
    pub key: String,
    pub error: String,
}

/// Error type for draft manager and content accessor operations.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The draft is live but only part of its content reached the content
    /// store. Re-applying it is safe.
    #[error(
        "Publish of version {version} incomplete: {} of {} keys failed",
        failed.len(),
        failed.len() + applied.len()
    )]
    PartialPublish {
        draft_id: DbId,
        version: i32,
        applied: Vec<String>,
        failed: Vec<KeyFailure>,
    },
}

pub type PublishResult<T> = Result<T, PublishError>;
