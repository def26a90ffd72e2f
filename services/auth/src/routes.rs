//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info};

use crate::{
    AppState,
    error::AuthError,
    middleware::{CurrentUser, auth_middleware},
    models::{LoginRequest, RegisterRequest, UserResponse},
    password, validation,
};

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/users/admins", get(admin_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Register a new user
///
/// The password is hashed before it is handed to the repository; the
/// plaintext is never stored. The created account immediately receives a
/// signed token.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Registration attempt for: {}", payload.email);

    validation::validate_nombre(&payload.nombre).map_err(AuthError::Validation)?;
    validation::validate_email(&payload.email).map_err(AuthError::Validation)?;
    validation::validate_password(&payload.password).map_err(AuthError::Validation)?;

    let rol = payload.rol.as_deref().unwrap_or("operador");
    validation::validate_rol(rol).map_err(AuthError::Validation)?;

    let password_hash = password::hash_password(payload.password).await.map_err(|e| {
        error!("Failed to hash password: {}", e);
        AuthError::Internal
    })?;

    let user = state
        .user_repository
        .create(payload.nombre.trim(), &payload.email, &password_hash, rol)
        .await?;

    let token = state.jwt_service.issue(&user).map_err(|e| {
        error!("Failed to issue token: {}", e);
        AuthError::Internal
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "token": token,
            "user": UserResponse::from(user),
        })),
    ))
}

/// User login endpoint
///
/// A missing user and a wrong password answer identically so the response
/// does not reveal which emails exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Login attempt for: {}", payload.email);

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::Validation(
            "Por favor, ingrese su email y contraseña".to_string(),
        ));
    }

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let matches = password::verify_password(payload.password, user.password_hash.clone())
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            AuthError::Internal
        })?;

    if !matches {
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.jwt_service.issue(&user).map_err(|e| {
        error!("Failed to issue token: {}", e);
        AuthError::Internal
    })?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": UserResponse::from(user),
    })))
}

/// Get the profile of the current user
pub async fn me(Extension(user): Extension<CurrentUser>) -> Result<impl IntoResponse, AuthError> {
    Ok(Json(json!({
        "success": true,
        "data": {
            "id": user.id,
            "nombre": user.nombre,
            "email": user.email,
            "rol": user.rol,
            "createdAt": user.created_at,
        },
    })))
}

/// List the users holding administrative roles
pub async fn admin_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AuthError> {
    if user.rol != "admin" && user.rol != "superadmin" {
        return Err(AuthError::Forbidden(format!(
            "El rol {} no está autorizado para acceder a esta ruta",
            user.rol
        )));
    }

    let users = state.user_repository.list_admins().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(json!({
        "success": true,
        "count": users.len(),
        "data": users,
    })))
}
