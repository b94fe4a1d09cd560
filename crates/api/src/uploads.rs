//! Reading uploaded files out of multipart bodies and writing them to disk.
//!
//! Acceptance rules live in [`studio_core::upload`]; this module only moves
//! bytes. Files land in `ServerConfig::upload_dir` and are served under
//! `/uploads`.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartError};
use studio_core::upload::{check_upload, public_path, stored_file_name, UploadPolicy};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Body limit for routes that accept uploads: the largest policy plus room
/// for the other multipart fields.
pub const MAX_UPLOAD_BODY: usize = 11 * 1024 * 1024;

/// A file part read fully into memory.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

pub(crate) fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}

/// Read a file field. The field's metadata is captured before the body is consumed.
pub async fn read_file(field: Field<'_>) -> AppResult<IncomingFile> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await.map_err(multipart_error)?;
    Ok(IncomingFile {
        file_name,
        content_type,
        data,
    })
}

/// Read a text field.
pub async fn read_text(field: Field<'_>) -> AppResult<String> {
    field.text().await.map_err(multipart_error)
}

/// Validate `file` against `policy` and write it under `dir`.
///
/// Returns the public path (`/uploads/<name>`) to store in documents.
pub async fn persist(dir: &Path, policy: &UploadPolicy, file: &IncomingFile) -> AppResult<String> {
    let ext = check_upload(
        policy,
        &file.file_name,
        file.content_type.as_deref(),
        file.data.len(),
    )?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let nonce = Uuid::new_v4().simple().to_string();
    let name = stored_file_name(
        policy.prefix,
        ext,
        chrono::Utc::now().timestamp_millis(),
        &nonce[..12],
    );

    // `create_new` so an existing upload is never truncated.
    let mut out = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dir.join(&name))
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload {name}: {e}")))?;
    out.write_all(&file.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload {name}: {e}")))?;
    out.flush()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload {name}: {e}")))?;

    tracing::info!(file = %name, bytes = file.data.len(), "Stored upload");
    Ok(public_path(&name))
}
