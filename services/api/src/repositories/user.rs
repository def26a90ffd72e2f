//! Lean user lookup for the authentication guard
//!
//! The api service never mutates accounts; it only resolves the identity a
//! verified token refers to. Account management lives in the auth service.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::middleware::CurrentUser;

/// User repository for identity lookups
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CurrentUser>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, nombre, email, rol
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| CurrentUser {
            id: row.get("id"),
            nombre: row.get("nombre"),
            email: row.get("email"),
            rol: row.get("rol"),
        }))
    }
}
