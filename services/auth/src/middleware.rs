//! Middleware for JWT token validation and authentication

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use tracing::error;
use uuid::Uuid;

use crate::{AppState, error::AuthError};

/// Identity attached to the request after a successful token check
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub rol: String,
    pub created_at: DateTime<Utc>,
}

/// Extract and validate the bearer token, then load the referenced user
///
/// Requests without a valid token never reach the handlers. A valid token
/// whose user no longer exists is treated as unauthorized as well.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Unauthorized)?;

    // Validate the token
    let claims = state.jwt_service.verify(token).map_err(|e| {
        error!("Failed to validate token: {}", e);
        AuthError::Unauthorized
    })?;

    // Load the referenced user; a stale token for a deleted user is rejected
    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    let current_user = CurrentUser {
        id: user.id,
        nombre: user.nombre,
        email: user.email,
        rol: user.rol,
        created_at: user.created_at,
    };

    // Attach the identity to the request for the handlers
    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::{Claims, JwtConfig, JwtService};
    use crate::repositories::UserRepository;
    use axum::{
        Router,
        http::{Request, StatusCode, header},
        middleware::from_fn_with_state,
        routing::get,
    };
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    use sqlx::postgres::PgPoolOptions;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tower::ServiceExt;

    const SECRET: &str = "test-secret";

    async fn ok_handler() -> &'static str {
        "ok"
    }

    // Rejections that happen before the user lookup never touch the pool,
    // so a lazily-connecting pool backs these tests without a database.
    fn protected_app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/unused")
            .unwrap();
        let state = AppState {
            db_pool: pool.clone(),
            jwt_service: JwtService::new(&JwtConfig {
                secret: SECRET.to_string(),
                expires_in: 3600,
            }),
            user_repository: UserRepository::new(pool),
        };

        Router::new()
            .route("/protected", get(ok_handler))
            .route_layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    async fn request_status(auth_header: Option<String>) -> StatusCode {
        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder.body(Body::empty()).unwrap();
        protected_app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert_eq!(request_status(None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let status = request_status(Some("Basic dXNlcjpwYXNz".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let status = request_status(Some("Bearer not-a-token".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "ana@x.com".to_string(),
            rol: "operador".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let status = request_status(Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
