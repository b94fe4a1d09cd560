pub mod auth;
pub mod contact;
pub mod crud;
pub mod health;
pub mod testimonials;
pub mod upload;

use axum::Router;
use studio_db::models::about::About;
use studio_db::models::portfolio_item::PortfolioItem;
use studio_db::models::service::Service;
use studio_db::models::team_member::TeamMember;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         get, update own profile (auth)
/// /auth/me/photo                                   upload profile photo (auth)
///
/// /services, /about, /team, /portfolio             list, create
/// /services/{id}, /about/{id}, ...                 get, update, delete
///
/// /contact                                         submit (public), list (auth)
/// /contact/{id}                                    delete (auth)
///
/// /testimonials                                    submit, list approved (public)
/// /testimonials/all                                list all (auth)
/// /testimonials/{id}                               moderate, delete (auth)
///
/// /upload                                          media upload (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Site content, editable from the admin panel.
        .nest("/services", crud::router::<Service>())
        .nest("/about", crud::router::<About>())
        .nest("/team", crud::router::<TeamMember>())
        .nest("/portfolio", crud::router::<PortfolioItem>())
        // Visitor submissions.
        .nest("/contact", contact::router())
        .nest("/testimonials", testimonials::router())
        .nest("/upload", upload::router())
}
