//! Route definitions for `/testimonials`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;
use studio_db::models::testimonial::Testimonial;

use crate::handlers::{crud, testimonials};
use crate::middleware::rbac::ModerateSubmissions;
use crate::state::AppState;
use crate::uploads::MAX_UPLOAD_BODY;

/// ```text
/// GET    /       -> list_approved (public)
/// POST   /       -> submit (public, JSON or multipart)
/// GET    /all    -> list_all
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(testimonials::list_approved)
                .post(testimonials::submit)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
        .route("/all", get(testimonials::list_all))
        .route(
            "/{id}",
            patch(crud::update::<Testimonial, ModerateSubmissions>)
                .delete(crud::delete::<Testimonial, ModerateSubmissions>),
        )
}
