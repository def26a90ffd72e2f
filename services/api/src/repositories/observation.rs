//! Observation repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::models::{NewObservation, Observation, ObservationListQuery, UpdateObservation};
use crate::pagination::PageParams;

const SELECT_COLUMNS: &str = "id, empleado, tipo, titulo, descripcion, fecha, \
     desarrollo, registrado_por, created_at, updated_at";

fn observation_from_row(row: &PgRow) -> Observation {
    Observation {
        id: row.get("id"),
        empleado: row.get("empleado"),
        tipo: row.get("tipo"),
        titulo: row.get("titulo"),
        descripcion: row.get("descripcion"),
        fecha: row.get("fecha"),
        desarrollo: row.get("desarrollo"),
        registrado_por: row.get("registrado_por"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ObservationListQuery) {
    if let Some(empleado) = query.empleado {
        qb.push(" AND empleado = ").push_bind(empleado);
    }
    if let Some(tipo) = &query.tipo {
        qb.push(" AND tipo = ").push_bind(tipo.clone());
    }
    if let Some(desde) = query.desde {
        qb.push(" AND fecha >= ").push_bind(desde);
    }
    if let Some(hasta) = query.hasta {
        qb.push(" AND fecha <= ").push_bind(hasta);
    }
}

/// Observation repository
#[derive(Clone)]
pub struct ObservationRepository {
    pool: PgPool,
}

impl ObservationRepository {
    /// Create a new observation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List observations with allow-listed filters, newest first
    pub async fn list(
        &self,
        query: &ObservationListQuery,
        params: PageParams,
    ) -> Result<(Vec<Observation>, i64), sqlx::Error> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM observaciones WHERE 1=1");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM observaciones WHERE 1=1",
            SELECT_COLUMNS
        ));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.limit_i64())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let observations = rows.iter().map(observation_from_row).collect();

        Ok((observations, total))
    }

    /// Find an observation by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Observation>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM observaciones WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(observation_from_row))
    }

    /// Insert a validated observation
    pub async fn create(
        &self,
        new: &NewObservation,
        registrado_por: Uuid,
    ) -> Result<Observation, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO observaciones (
                empleado, tipo, titulo, descripcion, fecha, desarrollo, registrado_por
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(new.empleado)
        .bind(&new.tipo)
        .bind(&new.titulo)
        .bind(&new.descripcion)
        .bind(new.fecha)
        .bind(&new.desarrollo)
        .bind(registrado_por)
        .fetch_one(&self.pool)
        .await?;

        Ok(observation_from_row(&row))
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateObservation,
    ) -> Result<Option<Observation>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE observaciones SET
                tipo = COALESCE($2, tipo),
                titulo = COALESCE($3, titulo),
                descripcion = COALESCE($4, descripcion),
                fecha = COALESCE($5, fecha),
                desarrollo = COALESCE($6, desarrollo),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(&payload.tipo)
        .bind(&payload.titulo)
        .bind(&payload.descripcion)
        .bind(payload.fecha)
        .bind(&payload.desarrollo)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(observation_from_row))
    }

    /// Hard-delete an observation
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM observaciones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
