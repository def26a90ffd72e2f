//! Authentication middleware and role/ownership checks
//!
//! The guard runs before every resource handler: it verifies the bearer
//! token signature and expiry, loads the referenced user, and attaches a
//! [`CurrentUser`] to the request. Role and ownership checks are explicit
//! functions called by the handlers that need them.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// JWT claims issued by the auth service
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// User role
    pub rol: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Token verifier built once at startup from `JWT_SECRET`
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Build a verifier for the shared HS256 secret
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Create a verifier from the `JWT_SECRET` environment variable
    ///
    /// A missing secret is a fatal startup condition.
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;
        Ok(Self::new(&secret))
    }

    /// Verify a token's signature and expiry and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

/// Identity attached to the request after a successful token check
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub rol: String,
}

/// Authentication middleware
///
/// Rejects with 401 on a missing or malformed header, a bad signature, an
/// expired token, or a token whose user no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    // Validate the token
    let claims = state.jwt_verifier.verify(token).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    // Load the referenced user; a stale token for a deleted user is rejected
    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Check the identity's role against a route's allow-list
///
/// A `superadmin` identity passes every check; this replaces the historical
/// first-account-by-id escape hatch with a role decided at account creation.
pub fn require_role(user: &CurrentUser, allowed: &[&str]) -> Result<(), ApiError> {
    if user.rol == "superadmin" {
        return Ok(());
    }

    if allowed.contains(&user.rol.as_str()) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "El rol {} no está autorizado para acceder a esta ruta",
            user.rol
        )))
    }
}

/// Ownership check for records that track their recorder
///
/// Only the original recorder, an admin, or a superadmin may mutate or
/// delete such a record.
pub fn require_owner_or_admin(user: &CurrentUser, owner: Uuid) -> Result<(), ApiError> {
    if user.id == owner || user.rol == "admin" || user.rol == "superadmin" {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "No está autorizado para modificar este registro".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_verifier_from_env_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        assert!(JwtVerifier::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_SECRET", "test-secret");
        }
        assert!(JwtVerifier::from_env().is_ok());
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    fn user_with_rol(rol: &str) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            nombre: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            rol: rol.to_string(),
        }
    }

    #[test]
    fn test_role_in_allow_list_passes() {
        let user = user_with_rol("supervisor");
        assert!(require_role(&user, &["admin", "supervisor"]).is_ok());
    }

    #[test]
    fn test_role_outside_allow_list_is_forbidden() {
        let user = user_with_rol("operador");
        let err = require_role(&user, &["admin"]).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_superadmin_passes_every_allow_list() {
        // Regression test: the superadmin role bypasses all role checks,
        // including an empty allow-list.
        let user = user_with_rol("superadmin");
        assert!(require_role(&user, &["admin"]).is_ok());
        assert!(require_role(&user, &["operador"]).is_ok());
        assert!(require_role(&user, &[]).is_ok());
    }

    #[test]
    fn test_owner_may_modify() {
        let user = user_with_rol("operador");
        assert!(require_owner_or_admin(&user, user.id).is_ok());
    }

    #[test]
    fn test_non_owner_non_admin_is_forbidden() {
        let user = user_with_rol("operador");
        let err = require_owner_or_admin(&user, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_admin_may_modify_any_record() {
        let admin = user_with_rol("admin");
        assert!(require_owner_or_admin(&admin, Uuid::new_v4()).is_ok());

        let superadmin = user_with_rol("superadmin");
        assert!(require_owner_or_admin(&superadmin, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_verifier_round_trip_with_auth_claims() {
        use jsonwebtoken::{EncodingKey, Header, encode};
        use serde::Serialize;
        use std::time::{SystemTime, UNIX_EPOCH};

        #[derive(Serialize)]
        struct IssuedClaims {
            sub: Uuid,
            email: String,
            rol: String,
            iat: u64,
            exp: u64,
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let id = Uuid::new_v4();
        let issued = IssuedClaims {
            sub: id,
            email: "ana@x.com".to_string(),
            rol: "admin".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &issued,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let verifier = JwtVerifier::new("test-secret");
        let claims = verifier.verify(&token).expect("token should verify");
        assert_eq!(claims.sub, id);
        assert_eq!(claims.rol, "admin");

        let other = JwtVerifier::new("other-secret");
        assert!(other.verify(&token).is_err());
    }

    mod guard {
        use super::*;
        use crate::repositories::{
            AgencyRepository, AttendanceRepository, EmployeeRepository, ObservationRepository,
            PerformanceRepository, UserRepository,
        };
        use crate::state::AppState;
        use axum::{
            Router,
            body::Body,
            http::{Request, StatusCode, header},
            middleware::from_fn_with_state,
            routing::get,
        };
        use jsonwebtoken::{EncodingKey, Header, encode};
        use serde::Serialize;
        use sqlx::PgPool;
        use sqlx::postgres::PgPoolOptions;
        use std::time::{SystemTime, UNIX_EPOCH};
        use tower::ServiceExt;

        const SECRET: &str = "test-secret";

        async fn ok_handler() -> &'static str {
            "ok"
        }

        fn protected_app(pool: PgPool) -> Router {
            let state = AppState {
                db_pool: pool.clone(),
                jwt_verifier: JwtVerifier::new(SECRET),
                user_repository: UserRepository::new(pool.clone()),
                employee_repository: EmployeeRepository::new(pool.clone()),
                agency_repository: AgencyRepository::new(pool.clone()),
                attendance_repository: AttendanceRepository::new(pool.clone()),
                performance_repository: PerformanceRepository::new(pool.clone()),
                observation_repository: ObservationRepository::new(pool),
            };

            Router::new()
                .route("/protected", get(ok_handler))
                .route_layer(from_fn_with_state(state.clone(), auth_middleware))
                .with_state(state)
        }

        // Rejections that happen before the user lookup never touch the
        // pool, so a lazily-connecting pool backs them without a database.
        fn lazy_app() -> Router {
            let pool = PgPoolOptions::new()
                .connect_lazy("postgresql://localhost/unused")
                .unwrap();
            protected_app(pool)
        }

        fn signed_token(sub: Uuid, iat: u64, exp: u64) -> String {
            #[derive(Serialize)]
            struct IssuedClaims {
                sub: Uuid,
                email: String,
                rol: String,
                iat: u64,
                exp: u64,
            }

            let claims = IssuedClaims {
                sub,
                email: "ana@x.com".to_string(),
                rol: "admin".to_string(),
                iat,
                exp,
            };
            encode(
                &Header::new(Algorithm::HS256),
                &claims,
                &EncodingKey::from_secret(SECRET.as_bytes()),
            )
            .unwrap()
        }

        fn now() -> u64 {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_secs()
        }

        async fn request_status(app: Router, auth_header: Option<String>) -> StatusCode {
            let mut builder = Request::builder().uri("/protected");
            if let Some(value) = auth_header {
                builder = builder.header(header::AUTHORIZATION, value);
            }
            let request = builder.body(Body::empty()).unwrap();
            app.oneshot(request).await.unwrap().status()
        }

        #[tokio::test]
        async fn test_missing_header_is_unauthorized() {
            let status = request_status(lazy_app(), None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn test_non_bearer_scheme_is_unauthorized() {
            let status = request_status(lazy_app(), Some("Token abc".to_string())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn test_garbage_token_is_unauthorized() {
            let status =
                request_status(lazy_app(), Some("Bearer not-a-token".to_string())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn test_expired_token_is_unauthorized() {
            let token = signed_token(Uuid::new_v4(), now() - 7200, now() - 3600);
            let status = request_status(lazy_app(), Some(format!("Bearer {}", token))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        #[ignore = "requires a running PostgreSQL instance"]
        async fn test_valid_token_for_missing_user_is_unauthorized() {
            use common::database::{DatabaseConfig, init_pool};

            let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
            let pool = init_pool(&config).await.expect("pool should connect");
            let app = protected_app(pool);

            // well-formed, unexpired token whose subject does not exist
            let token = signed_token(Uuid::new_v4(), now(), now() + 3600);
            let status = request_status(app, Some(format!("Bearer {}", token))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }
}
