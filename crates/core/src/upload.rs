//! Upload acceptance rules and stored-file naming.
//!
//! Pure logic only; the API layer does the multipart reading and disk writes.

use std::path::Path;

use crate::error::CoreError;

/// Public URL prefix under which stored uploads are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Extensions accepted by the generic media upload endpoint.
const MEDIA_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Extensions accepted for testimonial and profile photos.
const PHOTO_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// Acceptance rules for one upload endpoint.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    /// Multipart field name carrying the file.
    pub field: &'static str,
    /// Prefix of the generated file name.
    pub prefix: &'static str,
    /// Maximum accepted size in bytes.
    pub max_bytes: usize,
    /// Lower-case extensions allowed. The content type must be `image/*` and
    /// name one of them (`image/jpeg` covers `.jpg`).
    pub extensions: &'static [&'static str],
}

/// `POST /api/upload`: site imagery used by content records.
pub const MEDIA_UPLOAD: UploadPolicy = UploadPolicy {
    field: "image",
    prefix: "image",
    max_bytes: 10_000_000,
    extensions: MEDIA_EXTENSIONS,
};

/// Photo attached to a public testimonial submission.
pub const TESTIMONIAL_PHOTO: UploadPolicy = UploadPolicy {
    field: "photo",
    prefix: "testimonial",
    max_bytes: 5 * 1024 * 1024,
    extensions: PHOTO_EXTENSIONS,
};

/// Admin profile photo.
pub const PROFILE_PHOTO: UploadPolicy = UploadPolicy {
    field: "profilePhoto",
    prefix: "profile",
    max_bytes: 5 * 1024 * 1024,
    extensions: PHOTO_EXTENSIONS,
};

/// Lower-cased extension of `file_name` without the dot, if any.
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
}

/// Check an incoming file against `policy`.
///
/// Returns the allow-listed extension the stored file must use. Nothing the
/// client sent ends up in the stored name unless it matched the list.
pub fn check_upload(
    policy: &UploadPolicy,
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<&'static str, CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("No file selected".into()));
    }
    if size > policy.max_bytes {
        return Err(CoreError::Validation(format!(
            "File too large: {size} bytes exceeds the {} byte limit",
            policy.max_bytes
        )));
    }

    let mime = content_type.unwrap_or_default().to_ascii_lowercase();
    let subtype = mime.strip_prefix("image/").unwrap_or_default();
    let mime_ok = policy.extensions.iter().any(|a| subtype == *a)
        || (subtype == "jpeg" && policy.extensions.contains(&"jpg"));

    let ext = extension_of(file_name)
        .and_then(|e| policy.extensions.iter().copied().find(|a| *a == e));

    match ext {
        Some(ext) if mime_ok => Ok(ext),
        _ => Err(CoreError::Validation("Images only".into())),
    }
}

/// Generated name for a stored upload: `<prefix>-<unix millis>-<nonce>.<ext>`.
///
/// The nonce keeps uploads landing in the same millisecond apart.
pub fn stored_file_name(prefix: &str, ext: &str, unix_millis: i64, nonce: &str) -> String {
    format!("{prefix}-{unix_millis}-{nonce}.{ext}")
}

/// Public path a stored file is served at.
pub fn public_path(file_name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{file_name}")
}
