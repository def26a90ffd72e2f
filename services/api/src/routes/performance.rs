//! Performance review resource handlers
//!
//! Reviews belong to their evaluator: only the evaluator or an
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
    models::{CreatePerformance, PerformanceListQuery, UpdatePerformance},
    pagination::{PageParams, Pagination},
    state::AppState,
    validation,
};

/// List performance reviews with optional filters and pagination
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PerformanceListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = PageParams::new(query.page, query.limit);
    let (reviews, total) = state.performance_repository.list(&query, params).await?;

    Ok(Json(json!({
        "success": true,
        "count": total,
        "pagination": Pagination::new(params, total),
        "data": reviews,
    })))
}

/// Get a single performance review
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state
        .performance_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Desempeño no encontrado con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": review,
    })))
}

/// Record a performance review for an employee
///
/// The evaluator is always the authenticated identity.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreatePerformance>,
) -> Result<impl IntoResponse, ApiError> {
    let new = validation::performance_create(payload)?;

    if !state.employee_repository.exists(new.empleado).await? {
        return Err(ApiError::NotFound(format!(
            "Empleado no encontrado con id {}",
            new.empleado
        )));
    }

    let review = state.performance_repository.create(&new, user.id).await?;
    info!("Performance review recorded: {}", review.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": review,
        })),
    ))
}

/// Update a performance review; evaluator or administrator only
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePerformance>,
) -> Result<impl IntoResponse, ApiError> {
    validation::performance_update(&payload)?;

    let review = state
        .performance_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Desempeño no encontrado con id {}", id)))?;

    require_owner_or_admin(&user, review.evaluador)?;

    let review = state
        .performance_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Desempeño no encontrado con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": review,
    })))
}

/// Delete a performance review; evaluator or administrator only
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state
        .performance_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Desempeño no encontrado con id {}", id)))?;

    require_owner_or_admin(&user, review.evaluador)?;

    state.performance_repository.delete(id).await?;
    info!("Performance review deleted: {}", id);

    Ok(Json(json!({
        "success": true,
        "data": {},
    })))
}
