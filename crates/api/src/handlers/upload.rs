//! Generic media upload used by the admin content editors.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use studio_core::upload::MEDIA_UPLOAD;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Require, UploadMedia};
use crate::state::AppState;
use crate::uploads;

/// Response for a stored upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Public path, e.g. `/uploads/image-1700000000000.png`.
    pub file_path: String,
}

/// POST /api/upload
///
/// Accepts a single image in the `image` field.
pub async fn upload_image(
    Require(user, ..): Require<UploadMedia>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(uploads::multipart_error)? {
        if field.name() == Some(MEDIA_UPLOAD.field) {
            file = Some(uploads::read_file(field).await?);
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file selected".into()))?;
    let file_path = uploads::persist(&state.config.upload_dir, &MEDIA_UPLOAD, &file).await?;

    tracing::info!(user_id = %user.user_id, %file_path, "Media uploaded");

    Ok(Json(UploadResponse {
        message: "File uploaded successfully!".into(),
        file_path,
    }))
}
