//! Performance review repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::models::{NewPerformance, Performance, PerformanceListQuery, UpdatePerformance};
use crate::pagination::PageParams;

const SELECT_COLUMNS: &str = "id, empleado, fecha, puntualidad, proactividad, \
     calidad_servicio, observaciones, evaluacion_personal, evaluador, created_at";

fn performance_from_row(row: &PgRow) -> Performance {
    Performance {
        id: row.get("id"),
        empleado: row.get("empleado"),
        fecha: row.get("fecha"),
        puntualidad: row.get("puntualidad"),
        proactividad: row.get("proactividad"),
        calidad_servicio: row.get("calidad_servicio"),
        observaciones: row.get("observaciones"),
        evaluacion_personal: row.get("evaluacion_personal"),
        evaluador: row.get("evaluador"),
        created_at: row.get("created_at"),
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &PerformanceListQuery) {
    if let Some(empleado) = query.empleado {
        qb.push(" AND empleado = ").push_bind(empleado);
    }
    if let Some(evaluador) = query.evaluador {
        qb.push(" AND evaluador = ").push_bind(evaluador);
    }
    if let Some(desde) = query.desde {
        qb.push(" AND fecha >= ").push_bind(desde);
    }
    if let Some(hasta) = query.hasta {
        qb.push(" AND fecha <= ").push_bind(hasta);
    }
}

/// Performance review repository
#[derive(Clone)]
pub struct PerformanceRepository {
    pool: PgPool,
}

impl PerformanceRepository {
    /// Create a new performance repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List performance reviews with allow-listed filters, newest first
    pub async fn list(
        &self,
        query: &PerformanceListQuery,
        params: PageParams,
    ) -> Result<(Vec<Performance>, i64), sqlx::Error> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM desempenos WHERE 1=1");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM desempenos WHERE 1=1",
            SELECT_COLUMNS
        ));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.limit_i64())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let reviews = rows.iter().map(performance_from_row).collect();

        Ok((reviews, total))
    }

    /// Find a performance review by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Performance>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM desempenos WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(performance_from_row))
    }

    /// Insert a validated performance review
    pub async fn create(
        &self,
        new: &NewPerformance,
        evaluador: Uuid,
    ) -> Result<Performance, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO desempenos (
                empleado, fecha, puntualidad, proactividad, calidad_servicio,
                observaciones, evaluacion_personal, evaluador
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(new.empleado)
        .bind(new.fecha)
        .bind(new.puntualidad)
        .bind(new.proactividad)
        .bind(new.calidad_servicio)
        .bind(&new.observaciones)
        .bind(&new.evaluacion_personal)
        .bind(evaluador)
        .fetch_one(&self.pool)
        .await?;

        Ok(performance_from_row(&row))
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdatePerformance,
    ) -> Result<Option<Performance>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE desempenos SET
                fecha = COALESCE($2, fecha),
                puntualidad = COALESCE($3, puntualidad),
                proactividad = COALESCE($4, proactividad),
                calidad_servicio = COALESCE($5, calidad_servicio),
                observaciones = COALESCE($6, observaciones),
                evaluacion_personal = COALESCE($7, evaluacion_personal)
            WHERE id = $1
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(payload.fecha)
        .bind(payload.puntualidad)
        .bind(payload.proactividad)
        .bind(payload.calidad_servicio)
        .bind(&payload.observaciones)
        .bind(&payload.evaluacion_personal)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(performance_from_row))
    }

    /// Hard-delete a performance review
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM desempenos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
