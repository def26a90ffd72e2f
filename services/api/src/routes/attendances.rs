//! Attendance resource handlers
//!
//! Any role may record attendance; corrections are limited to supervisors
//! and administrators, and only administrators may delete a record.

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
    models::{AttendanceListQuery, CreateAttendance, UpdateAttendance},
    pagination::{PageParams, Pagination},
    state::AppState,
    validation,
};

/// List attendance records with optional filters and pagination
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AttendanceListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = PageParams::new(query.page, query.limit);
    let (records, total) = state.attendance_repository.list(&query, params).await?;

    Ok(Json(json!({
        "success": true,
        "count": total,
        "pagination": Pagination::new(params, total),
        "data": records,
    })))
}

/// Get a single attendance record
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .attendance_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Asistencia no encontrada con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": record,
    })))
}

/// Record an attendance entry for an employee
///
/// The recorder is always the authenticated identity.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateAttendance>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &["admin", "supervisor", "operador"])?;

    let new = validation::attendance_create(payload)?;

    if !state.employee_repository.exists(new.empleado).await? {
        return Err(ApiError::NotFound(format!(
            "Empleado no encontrado con id {}",
            new.empleado
        )));
    }

    let record = state.attendance_repository.create(&new, user.id).await?;
    info!("Attendance recorded: {}", record.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": record,
        })),
    ))
}

/// Correct an attendance record; supervisors and administrators only
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttendance>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &["admin", "supervisor"])?;
    validation::attendance_update(&payload)?;

    let record = state
        .attendance_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Asistencia no encontrada con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": record,
    })))
}

/// Delete an attendance record; administrators only
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &["admin"])?;

    let removed = state.attendance_repository.delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "Asistencia no encontrada con id {}",
            id
        )));
    }
    info!("Attendance deleted: {}", id);

    Ok(Json(json!({
        "success": true,
        "data": {},
    })))
}
