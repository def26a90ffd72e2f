//! Observation resource handlers
//!
//! Observations belong to their recorder: only the recorder or an
//! administrator may change or delete one.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{CurrentUser, require_owner_or_admin},
    models::{CreateObservation, ObservationListQuery, UpdateObservation},
    pagination::{PageParams, Pagination},
    state::AppState,
    validation,
};

/// List observations with optional filters and pagination
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ObservationListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = PageParams::new(query.page, query.limit);
    let (observations, total) = state.observation_repository.list(&query, params).await?;

    Ok(Json(json!({
        "success": true,
        "count": total,
        "pagination": Pagination::new(params, total),
        "data": observations,
    })))
}

/// Get a single observation
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let observation = state
        .observation_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Observación no encontrada con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": observation,
    })))
}

/// Record an observation about an employee
///
/// The recorder is always the authenticated identity.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateObservation>,
) -> Result<impl IntoResponse, ApiError> {
    let new = validation::observation_create(payload)?;

    if !state.employee_repository.exists(new.empleado).await? {
        return Err(ApiError::NotFound(format!(
            "Empleado no encontrado con id {}",
            new.empleado
        )));
    }

    let observation = state.observation_repository.create(&new, user.id).await?;
    info!("Observation recorded: {}", observation.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": observation,
        })),
    ))
}

/// Update an observation; recorder or administrator only
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateObservation>,
) -> Result<impl IntoResponse, ApiError> {
    validation::observation_update(&payload)?;

    let observation = state
        .observation_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Observación no encontrada con id {}", id)))?;

    require_owner_or_admin(&user, observation.registrado_por)?;

    let observation = state
        .observation_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Observación no encontrada con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": observation,
    })))
}

/// Delete an observation; recorder or administrator only
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let observation = state
        .observation_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Observación no encontrada con id {}", id)))?;

    require_owner_or_admin(&user, observation.registrado_por)?;

    state.observation_repository.delete(id).await?;
    info!("Observation deleted: {}", id);

    Ok(Json(json!({
        "success": true,
        "data": {},
    })))
}
