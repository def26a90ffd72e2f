//! Resource routes for the personnel API
//!
//! Every resource route sits behind the authentication guard; role and
//! ownership checks happen inside the handlers that need them.

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::middleware::auth_middleware;
use crate::state::AppState;

mod agencies;
mod attendances;
mod employees;
mod observations;
mod performance;

/// Create the router for the personnel API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/employees/:id",
            get(employees::get_by_id)
                .put(employees::update)
                .delete(employees::delete),
        )
        .route("/agencies", get(agencies::list).post(agencies::create))
        .route(
            "/agencies/:id",
            get(agencies::get_by_id)
                .put(agencies::update)
                .delete(agencies::delete),
        )
        .route(
            "/attendances",
            get(attendances::list).post(attendances::create),
        )
        .route(
            "/attendances/:id",
            get(attendances::get_by_id)
                .put(attendances::update)
                .delete(attendances::delete),
        )
        .route(
            "/performance-reviews",
            get(performance::list).post(performance::create),
        )
        .route(
            "/performance-reviews/:id",
            get(performance::get_by_id)
                .put(performance::update)
                .delete(performance::delete),
        )
        .route(
            "/observations",
            get(observations::list).post(observations::create),
        )
        .route(
            "/observations/:id",
            get(observations::get_by_id)
                .put(observations::update)
                .delete(observations::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}
