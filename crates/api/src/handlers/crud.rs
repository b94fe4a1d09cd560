//! Generic CRUD handlers, instantiated per resource by
//! [`routes::crud::router`](crate::routes::crud::router).
//!
//! Reads are public. Writes require the capability named by `C`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use studio_core::error::CoreError;
use studio_db::models::{Editable, Resource};
use studio_db::repositories::RecordRepo;
use studio_db::Document;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{Require, Requirement};
use crate::response::DeleteResponse;
use crate::state::AppState;

fn not_found<R: Resource>(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}

/// GET /api/{resource}
///
/// Every record in the collection. An empty collection yields `[]`.
pub async fn list<R: Resource>(State(state): State<AppState>) -> AppResult<Json<Vec<Document>>> {
    let records = RecordRepo::list::<R>(state.store()).await?;
    Ok(Json(records))
}

/// GET /api/{resource}/{id}
pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Document>> {
    let record = RecordRepo::find_by_id::<R>(state.store(), &id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(record))
}

/// POST /api/{resource}
///
/// Persist a validated payload; responds 201 with the stored record.
pub async fn create<R: Resource, C: Requirement>(
    Require(user, ..): Require<C>,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<R::Create>,
) -> AppResult<(StatusCode, Json<Document>)> {
    let record = RecordRepo::create::<R>(state.store(), &input).await?;

    tracing::info!(
        entity = R::ENTITY,
        id = %record.id,
        user_id = %user.user_id,
        "Record created",
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH|PUT /api/{resource}/{id}
///
/// Shallow-merge the provided fields. Unknown ids are 404; last write wins.
pub async fn update<R: Editable, C: Requirement>(
    Require(user, ..): Require<C>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<R::Update>,
) -> AppResult<Json<Document>> {
    let record = RecordRepo::update::<R>(state.store(), &id, &input)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;

    tracing::info!(
        entity = R::ENTITY,
        id = %record.id,
        user_id = %user.user_id,
        "Record updated",
    );

    Ok(Json(record))
}

/// DELETE /api/{resource}/{id}
///
/// Always 200 on a healthy store. Removing an unknown id is logged and
/// reported through `deleted: false` rather than an error status.
pub async fn delete<R: Resource, C: Requirement>(
    Require(user, ..): Require<C>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = RecordRepo::delete::<R>(state.store(), &id).await?;

    if deleted {
        tracing::info!(entity = R::ENTITY, %id, user_id = %user.user_id, "Record deleted");
    } else {
        tracing::warn!(
            entity = R::ENTITY,
            %id,
            user_id = %user.user_id,
            "Delete requested for unknown record",
        );
    }

    Ok(Json(DeleteResponse {
        message: format!("Deleted {}", R::ENTITY),
        deleted,
    }))
}
