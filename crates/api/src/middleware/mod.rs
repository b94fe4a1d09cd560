//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::Require`] -- Requires a specific [`Capability`](studio_core::roles::Capability).

pub mod auth;
pub mod rbac;
