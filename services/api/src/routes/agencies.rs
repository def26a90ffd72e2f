//! Agency resource handlers
//!
//! Reads are open to every authenticated identity; mutations are reserved
//! for administrators.

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
    middleware::{CurrentUser, require_role},
    models::{AgencyListQuery, CreateAgency, UpdateAgency},
    pagination::{PageParams, Pagination},
    state::AppState,
    validation,
};

/// List agencies with optional filters and pagination
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AgencyListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = PageParams::new(query.page, query.limit);
    let (agencies, total) = state.agency_repository.list(&query, params).await?;

    Ok(Json(json!({
        "success": true,
        "count": total,
        "pagination": Pagination::new(params, total),
        "data": agencies,
    })))
}

/// Get a single agency
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let agency = state
        .agency_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Agencia no encontrada con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": agency,
    })))
}

/// Create an agency; administrators only
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateAgency>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &["admin"])?;

    let new = validation::agency_create(payload)?;
    let agency = state.agency_repository.create(&new).await?;
    info!("Agency created: {}", agency.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": agency,
        })),
    ))
}

/// Update an agency; administrators only
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAgency>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &["admin"])?;
    validation::agency_update(&payload)?;

    let agency = state
        .agency_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Agencia no encontrada con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": agency,
    })))
}

/// Deactivate an agency; administrators only
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &["admin"])?;

    let removed = state.agency_repository.soft_delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "Agencia no encontrada con id {}",
            id
        )));
    }
    info!("Agency deactivated: {}", id);

    Ok(Json(json!({
        "success": true,
        "data": {},
    })))
}
