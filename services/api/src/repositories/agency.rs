//! Agency repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::models::{Agency, AgencyListQuery, NewAgency, UpdateAgency};
use crate::pagination::PageParams;

const SELECT_COLUMNS: &str =
    "id, nombre, direccion, ciudad, telefono, encargado, activo, created_at";

fn agency_from_row(row: &PgRow) -> Agency {
    Agency {
        id: row.get("id"),
        nombre: row.get("nombre"),
        direccion: row.get("direccion"),
        ciudad: row.get("ciudad"),
        telefono: row.get("telefono"),
        encargado: row.get("encargado"),
        activo: row.get("activo"),
        created_at: row.get("created_at"),
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &AgencyListQuery) {
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (nombre ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR ciudad ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(activo) = query.activo {
        qb.push(" AND activo = ").push_bind(activo);
    }
}

/// Agency repository
#[derive(Clone)]
pub struct AgencyRepository {
    pool: PgPool,
}

impl AgencyRepository {
    /// Create a new agency repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List agencies with allow-listed filters, newest first
    pub async fn list(
        &self,
        query: &AgencyListQuery,
        params: PageParams,
    ) -> Result<(Vec<Agency>, i64), sqlx::Error> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM agencias WHERE 1=1");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM agencias WHERE 1=1",
            SELECT_COLUMNS
        ));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.limit_i64())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let agencies = rows.iter().map(agency_from_row).collect();

        Ok((agencies, total))
    }

    /// Find an agency by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Agency>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM agencias WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(agency_from_row))
    }

    /// Check whether an agency exists
    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM agencias WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    /// Insert a validated agency
    pub async fn create(&self, new: &NewAgency) -> Result<Agency, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO agencias (nombre, direccion, ciudad, telefono, encargado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&new.nombre)
        .bind(&new.direccion)
        .bind(&new.ciudad)
        .bind(&new.telefono)
        .bind(new.encargado)
        .fetch_one(&self.pool)
        .await?;

        Ok(agency_from_row(&row))
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateAgency,
    ) -> Result<Option<Agency>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE agencias SET
                nombre = COALESCE($2, nombre),
                direccion = COALESCE($3, direccion),
                ciudad = COALESCE($4, ciudad),
                telefono = COALESCE($5, telefono),
                encargado = COALESCE($6, encargado),
                activo = COALESCE($7, activo)
            WHERE id = $1
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(&payload.nombre)
        .bind(&payload.direccion)
        .bind(&payload.ciudad)
        .bind(&payload.telefono)
        .bind(payload.encargado)
        .bind(payload.activo)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(agency_from_row))
    }

    /// Soft-delete an agency by flipping the active flag
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE agencias SET activo = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
