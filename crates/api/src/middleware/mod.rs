//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role and yields an
//!   [`AdminSession`](wedsite_core::session::AdminSession).

pub mod auth;
pub mod rbac;
