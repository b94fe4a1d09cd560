//! Handlers for the `/auth` resource (register, login, own profile).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::error::CoreError;
use studio_core::roles::Role;
use studio_core::upload::PROFILE_PHOTO;
use studio_core::validation::{non_empty_opt, not_blank, trimmed, trimmed_opt};
use studio_db::models::user::{NewUser, UserPatch, UserProfile};
use studio_db::repositories::UserRepo;
use studio_db::StoreError;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::uploads;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "password_strength"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

/// Request body for `PUT /auth/me`. Omitted fields are left unchanged, and
/// an empty password counts as omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_empty_opt")]
    #[validate(custom(function = "password_strength"))]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub result: UserProfile,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn conflict_on_duplicate(err: StoreError, message: &str) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::Core(CoreError::Conflict(message.into())),
        other => other.into(),
    }
}

/// POST /api/auth/register
///
/// Create an admin account. Closed when `ALLOW_REGISTRATION=false`.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    if !state.config.registration_open {
        return Err(AppError::Core(CoreError::Forbidden(
            "Registration is closed".into(),
        )));
    }

    if UserRepo::find_by_email(state.store(), &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists.".into(),
        )));
    }

    let password_hash = hash_password(input.password).await?;

    // The lookup above races with concurrent registrations; the store's
    // unique email rule settles it.
    let user = UserRepo::create(
        state.store(),
        &NewUser {
            email: input.email,
            password_hash,
        },
    )
    .await
    .map_err(|e| conflict_on_duplicate(e, "User already exists."))?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully.")),
    ))
}

/// POST /api/auth/login
///
/// Verify credentials and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(state.store(), &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(input.password, user.password_hash.clone()).await?;

    if !password_valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = generate_access_token(&user.id, &user.email, Role::Admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        result: user.into(),
        token,
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserProfile>> {
    let current = UserRepo::find_by_id(state.store(), &user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(current.into()))
}

/// PUT /api/auth/me
///
/// Change the caller's email and/or password.
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    let mut patch = UserPatch::default();

    if let Some(email) = input.email {
        if let Some(existing) = UserRepo::find_by_email(state.store(), &email).await? {
            if existing.id != user.user_id {
                return Err(AppError::Core(CoreError::Conflict(
                    "Email already in use.".into(),
                )));
            }
        }
        patch.email = Some(email);
    }

    if let Some(password) = input.password {
        patch.password_hash = Some(hash_password(password).await?);
    }

    let updated = UserRepo::update(state.store(), &user.user_id, &patch)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Email already in use."))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id.clone(),
        }))?;

    tracing::info!(user_id = %user.user_id, "Profile updated");

    Ok(Json(updated.into()))
}

/// POST /api/auth/me/photo
///
/// Multipart upload of the `profilePhoto` field.
pub async fn upload_photo(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UserProfile>> {
    let mut photo = None;
    while let Some(field) = multipart.next_field().await.map_err(uploads::multipart_error)? {
        if field.name() == Some(PROFILE_PHOTO.field) {
            photo = Some(uploads::read_file(field).await?);
        }
    }

    let photo = photo.ok_or_else(|| AppError::BadRequest("No file selected".into()))?;
    let path = uploads::persist(&state.config.upload_dir, &PROFILE_PHOTO, &photo).await?;

    let patch = UserPatch {
        profile_photo: Some(path),
        ..Default::default()
    };
    let updated = UserRepo::update(state.store(), &user.user_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id.clone(),
        }))?;

    tracing::info!(user_id = %user.user_id, "Profile photo updated");

    Ok(Json(updated.into()))
}
