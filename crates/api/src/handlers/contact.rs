//! Handlers for the public contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use studio_db::models::contact_message::{ContactMessage, CreateContactMessage};
use studio_db::repositories::RecordRepo;
use studio_db::Document;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{ModerateSubmissions, Require};
use crate::state::AppState;

/// POST /api/contact
///
/// Public. Stores the visitor's message for the admin inbox.
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<Document>)> {
    let record = RecordRepo::create::<ContactMessage>(state.store(), &input).await?;
    tracing::info!(id = %record.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/contact
pub async fn list(
    _auth: Require<ModerateSubmissions>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Document>>> {
    let messages = RecordRepo::list::<ContactMessage>(state.store()).await?;
    Ok(Json(messages))
}
