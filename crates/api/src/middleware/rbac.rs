//! Capability-based access control extractors.
//!
//! [`Require<C>`] wraps [`AuthUser`] and rejects requests whose role does not
//! grant `C`'s capability. Use these in route handlers to enforce
//! authorization at the type level.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use studio_core::roles::Capability;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Type-level name of a [`Capability`].
pub trait Requirement: Send + Sync + 'static {
    const CAPABILITY: Capability;
}

/// Edit site content (services, about, team, portfolio).
pub struct ManageContent;

impl Requirement for ManageContent {
    const CAPABILITY: Capability = Capability::ManageContent;
}

/// Read contact messages and moderate testimonials.
pub struct ModerateSubmissions;

impl Requirement for ModerateSubmissions {
    const CAPABILITY: Capability = Capability::ModerateSubmissions;
}

/// Upload media files.
pub struct UploadMedia;

impl Requirement for UploadMedia {
    const CAPABILITY: Capability = Capability::UploadMedia;
}

/// Requires an authenticated user holding `C`'s capability.
/// Rejects with 401 without a valid token, 403 without the capability.
///
/// ```ignore
/// async fn edit(Require(user, ..): Require<ManageContent>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct Require<C: Requirement>(pub AuthUser, pub PhantomData<C>);

impl<C: Requirement> FromRequestParts<AppState> for Require<C> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(C::CAPABILITY)?;
        Ok(Require(user, PhantomData))
    }
}
