//! Route factory for plain content collections.

use axum::routing::get;
use axum::Router;
use studio_db::models::Editable;

use crate::handlers::crud;
use crate::middleware::rbac::ManageContent;
use crate::state::AppState;

/// Routes for resource `R`, mounted at `/{collection}`.
///
/// ```text
/// GET    /        -> list (public)
/// POST   /        -> create
/// GET    /{id}    -> get_one (public)
/// PATCH  /{id}    -> update
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router<R: Editable>() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(crud::list::<R>).post(crud::create::<R, ManageContent>),
        )
        .route(
            "/{id}",
            get(crud::get_one::<R>)
                .patch(crud::update::<R, ManageContent>)
                .put(crud::update::<R, ManageContent>)
                .delete(crud::delete::<R, ManageContent>),
        )
}
