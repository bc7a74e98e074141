//! The authenticated admin performing workflow operations.
//!
//! Identity comes from the external auth service. It is passed explicitly to
//! the publishing workflow instead of being read from ambient state.

use serde::Serialize;

pub const ROLE_ADMIN: &str = "admin";

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    /// Subject identifier issued by the auth service.
    pub user_id: String,
    pub email: Option<String>,
}

impl AdminSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }
}
