use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;
use crate::uploads::MAX_UPLOAD_BODY;

/// Routes mounted at `/upload`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(upload::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
    )
}
