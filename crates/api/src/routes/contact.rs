//! Route definitions for `/contact`.

use axum::routing::{delete, get};
use axum::Router;
use studio_db::models::contact_message::ContactMessage;

use crate::handlers::{contact, crud};
use crate::middleware::rbac::ModerateSubmissions;
use crate::state::AppState;

/// ```text
/// POST   /       -> submit (public)
/// GET    /       -> list
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::submit))
        .route(
            "/{id}",
            delete(crud::delete::<ContactMessage, ModerateSubmissions>),
        )
}
