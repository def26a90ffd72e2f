//! User repository for database operations

use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::User;

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        nombre: row.get("nombre"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        rol: row.get("rol"),
        created_at: row.get("created_at"),
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user with an already-hashed password
    ///
    /// The unique index on the lowercased email surfaces duplicates as a
    /// database unique violation, which the route layer maps to a conflict.
    pub async fn create(
        &self,
        nombre: &str,
        email: &str,
        password_hash: &str,
        rol: &str,
    ) -> Result<User, sqlx::Error> {
        info!("Creating new user: {}", email);

        let row = sqlx::query(
            r#"
            INSERT INTO usuarios (nombre, email, password_hash, rol)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nombre, email, password_hash, rol, created_at
            "#,
        )
        .bind(nombre)
        .bind(email)
        .bind(password_hash)
        .bind(rol)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row))
    }

    /// Find a user by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, nombre, email, password_hash, rol, created_at
            FROM usuarios
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, nombre, email, password_hash, rol, created_at
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// List the users holding administrative roles
    pub async fn list_admins(&self) -> Result<Vec<User>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, nombre, email, password_hash, rol, created_at
            FROM usuarios
            WHERE rol IN ('admin', 'supervisor')
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use common::database::{DatabaseConfig, init_pool};

    async fn test_repo() -> UserRepository {
        let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
        let pool = init_pool(&config).await.expect("pool should connect");
        UserRepository::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_create_and_lookup_round_trip() {
        let repo = test_repo().await;
        let email = format!("ana-{}@example.com", Uuid::new_v4());

        let created = repo
            .create("Ana", &email, "$argon2-hash", "operador")
            .await
            .unwrap();

        // lookup is case-insensitive
        let found = repo
            .find_by_email(&email.to_uppercase())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.rol, "operador");

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, email);
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_duplicate_email_maps_to_conflict() {
        let repo = test_repo().await;
        let email = format!("ana-{}@example.com", Uuid::new_v4());

        repo.create("Ana", &email, "$argon2-hash", "operador")
            .await
            .unwrap();
        let err = repo
            .create("Ana", &email.to_uppercase(), "$argon2-hash", "operador")
            .await
            .unwrap_err();
        assert!(matches!(AuthError::from(err), AuthError::Conflict(_)));
    }
}
