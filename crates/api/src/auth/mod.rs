//! Authentication primitives.
//!
//! - [`jwt`] -- Verification of admin access tokens issued by the external
//!   auth service.

pub mod jwt;
