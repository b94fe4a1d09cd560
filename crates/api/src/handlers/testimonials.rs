//! Handlers for testimonials: public submission and listing, admin moderation.
//!
//! Patch and delete go through the generic [`crud`](super::crud) handlers.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Json;
use studio_core::upload::TESTIMONIAL_PHOTO;
use studio_core::validation::parse_rating;
use studio_db::models::testimonial::{SubmitTestimonial, Testimonial};
use studio_db::repositories::{RecordRepo, TestimonialRepo};
use studio_db::Document;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{ModerateSubmissions, Require};
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::uploads::{self, IncomingFile};

/// POST /api/testimonials
///
/// Public. Accepts `multipart/form-data` (with an optional `photo`) or JSON.
/// Submissions are stored unapproved.
pub async fn submit(
    State(state): State<AppState>,
    req: Request,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let input = if is_multipart {
        let multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        read_multipart_submission(&state, multipart).await?
    } else {
        let ValidatedJson(input) =
            ValidatedJson::<SubmitTestimonial>::from_request(req, &state).await?;
        input
    };

    let record = RecordRepo::create::<Testimonial>(state.store(), &input).await?;
    tracing::info!(id = %record.id, rating = input.rating, "Testimonial submitted");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Testimonial submitted! Pending approval.",
        )),
    ))
}

/// Build a submission from form fields. Text fields are validated before the
/// photo is written so a rejected form leaves nothing on disk.
async fn read_multipart_submission(
    state: &AppState,
    mut multipart: Multipart,
) -> AppResult<SubmitTestimonial> {
    let mut name = String::new();
    let mut message = String::new();
    let mut rating: Option<String> = None;
    let mut photo: Option<IncomingFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(uploads::multipart_error)? {
        match field.name() {
            Some("name") => name = uploads::read_text(field).await?,
            Some("message") => message = uploads::read_text(field).await?,
            Some("rating") => rating = Some(uploads::read_text(field).await?),
            Some(f) if f == TESTIMONIAL_PHOTO.field => {
                let file = uploads::read_file(field).await?;
                // Browsers send an empty part when no file was chosen.
                if !file.data.is_empty() {
                    photo = Some(file);
                }
            }
            _ => {}
        }
    }

    let mut input = SubmitTestimonial {
        name: name.trim().to_string(),
        message,
        photo: None,
        rating: parse_rating(rating.as_deref()),
        approved: false,
    };
    input.validate()?;

    if let Some(file) = photo {
        let path = uploads::persist(&state.config.upload_dir, &TESTIMONIAL_PHOTO, &file).await?;
        input.photo = Some(path);
    }

    Ok(input)
}

/// GET /api/testimonials
///
/// Approved testimonials only, newest first.
pub async fn list_approved(State(state): State<AppState>) -> AppResult<Json<Vec<Document>>> {
    let testimonials = TestimonialRepo::list_approved(state.store()).await?;
    Ok(Json(testimonials))
}

/// GET /api/testimonials/all
pub async fn list_all(
    _auth: Require<ModerateSubmissions>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Document>>> {
    let testimonials = TestimonialRepo::list_all(state.store()).await?;
    Ok(Json(testimonials))
}
