//! Employee resource handlers
//!
//! Any authenticated identity may read and write employees; destruction is
//! a soft delete that keeps history referentially intact.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{CreateEmployee, EmployeeListQuery, UpdateEmployee},
    pagination::{PageParams, Pagination},
    state::AppState,
    validation,
};

/// List employees with optional filters and pagination
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = PageParams::new(query.page, query.limit);
    let (employees, total) = state.employee_repository.list(&query, params).await?;

    Ok(Json(json!({
        "success": true,
        "count": total,
        "pagination": Pagination::new(params, total),
        "data": employees,
    })))
}

/// Get a single employee
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state
        .employee_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Empleado no encontrado con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": employee,
    })))
}

/// Create an employee
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployee>,
) -> Result<impl IntoResponse, ApiError> {
    let new = validation::employee_create(payload)?;

    if let Some(agencia) = new.agencia {
        if !state.agency_repository.exists(agencia).await? {
            return Err(ApiError::NotFound(format!(
                "Agencia no encontrada con id {}",
                agencia
            )));
        }
    }

    let employee = state.employee_repository.create(&new).await?;
    info!("Employee created: {}", employee.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": employee,
        })),
    ))
}

/// Update an employee; only supplied fields change
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployee>,
) -> Result<impl IntoResponse, ApiError> {
    validation::employee_update(&payload)?;

    if let Some(agencia) = payload.agencia {
        if !state.agency_repository.exists(agencia).await? {
            return Err(ApiError::NotFound(format!(
                "Agencia no encontrada con id {}",
                agencia
            )));
        }
    }

    let employee = state
        .employee_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Empleado no encontrado con id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "data": employee,
    })))
}

/// Deactivate an employee
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state.employee_repository.soft_delete(id).await?;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "Empleado no encontrado con id {}",
            id
        )));
    }
    info!("Employee deactivated: {}", id);

    Ok(Json(json!({
        "success": true,
        "data": {},
    })))
}
