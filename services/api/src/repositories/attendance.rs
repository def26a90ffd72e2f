//! Attendance repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::models::{Attendance, AttendanceListQuery, NewAttendance, UpdateAttendance};
use crate::pagination::PageParams;

const SELECT_COLUMNS: &str = "id, empleado, fecha, hora_entrada, hora_salida, \
     tipo_asistencia, observaciones, registrado_por, created_at";

fn attendance_from_row(row: &PgRow) -> Attendance {
    Attendance {
        id: row.get("id"),
        empleado: row.get("empleado"),
        fecha: row.get("fecha"),
        hora_entrada: row.get("hora_entrada"),
        hora_salida: row.get("hora_salida"),
        tipo_asistencia: row.get("tipo_asistencia"),
        observaciones: row.get("observaciones"),
        registrado_por: row.get("registrado_por"),
        created_at: row.get("created_at"),
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &AttendanceListQuery) {
    if let Some(empleado) = query.empleado {
        qb.push(" AND empleado = ").push_bind(empleado);
    }
    if let Some(tipo) = &query.tipo {
        qb.push(" AND tipo_asistencia = ").push_bind(tipo.clone());
    }
    if let Some(desde) = query.desde {
        qb.push(" AND fecha >= ").push_bind(desde);
    }
    if let Some(hasta) = query.hasta {
        qb.push(" AND fecha <= ").push_bind(hasta);
    }
}

/// Attendance repository
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Create a new attendance repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List attendance records with allow-listed filters, newest first
    pub async fn list(
        &self,
        query: &AttendanceListQuery,
        params: PageParams,
    ) -> Result<(Vec<Attendance>, i64), sqlx::Error> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM asistencias WHERE 1=1");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM asistencias WHERE 1=1",
            SELECT_COLUMNS
        ));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.limit_i64())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let records = rows.iter().map(attendance_from_row).collect();

        Ok((records, total))
    }

    /// Find an attendance record by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM asistencias WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(attendance_from_row))
    }

    /// Insert a validated attendance record
    pub async fn create(
        &self,
        new: &NewAttendance,
        registrado_por: Uuid,
    ) -> Result<Attendance, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO asistencias (
                empleado, fecha, hora_entrada, hora_salida, tipo_asistencia,
                observaciones, registrado_por
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(new.empleado)
        .bind(new.fecha)
        .bind(new.hora_entrada)
        .bind(new.hora_salida)
        .bind(&new.tipo_asistencia)
        .bind(&new.observaciones)
        .bind(registrado_por)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendance_from_row(&row))
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateAttendance,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE asistencias SET
                fecha = COALESCE($2, fecha),
                hora_entrada = COALESCE($3, hora_entrada),
                hora_salida = COALESCE($4, hora_salida),
                tipo_asistencia = COALESCE($5, tipo_asistencia),
                observaciones = COALESCE($6, observaciones)
            WHERE id = $1
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(payload.fecha)
        .bind(payload.hora_entrada)
        .bind(payload.hora_salida)
        .bind(&payload.tipo_asistencia)
        .bind(&payload.observaciones)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(attendance_from_row))
    }

    /// Hard-delete an attendance record
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM asistencias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
