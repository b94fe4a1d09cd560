//! Route definitions for the `/auth` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;
use crate::uploads::MAX_UPLOAD_BODY;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register   -> register
/// POST /login      -> login
/// GET  /me         -> me (requires auth)
/// PUT  /me         -> update_me (requires auth)
/// POST /me/photo   -> upload_photo (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me).put(auth::update_me))
        .route(
            "/me/photo",
            post(auth::upload_photo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
}
