//! Employee repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::models::{Employee, EmployeeListQuery, NewEmployee, UpdateEmployee};
use crate::pagination::PageParams;

const SELECT_COLUMNS: &str = r#"
    e.id, e.nombre, e.apellido, e.ci, e.sexo, e.edad, e.telefono, e.direccion,
    e.fecha_nacimiento, e.fecha_contratacion, e.puesto, e.cargo, e.agencia,
    a.nombre AS agencia_nombre, e.activo, e.antecedentes, e.cargos_anteriores,
    e.recomendaciones, e.created_at, e.updated_at
"#;

fn employee_from_row(row: &PgRow) -> Employee {
    Employee {
        id: row.get("id"),
        nombre: row.get("nombre"),
        apellido: row.get("apellido"),
        ci: row.get("ci"),
        sexo: row.get("sexo"),
        edad: row.get("edad"),
        telefono: row.get("telefono"),
        direccion: row.get("direccion"),
        fecha_nacimiento: row.get("fecha_nacimiento"),
        fecha_contratacion: row.get("fecha_contratacion"),
        puesto: row.get("puesto"),
        cargo: row.get("cargo"),
        agencia: row.get("agencia"),
        agencia_nombre: row.get("agencia_nombre"),
        activo: row.get("activo"),
        antecedentes: row.get("antecedentes"),
        cargos_anteriores: row.get("cargos_anteriores"),
        recomendaciones: row.get("recomendaciones"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &EmployeeListQuery) {
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (e.nombre ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR e.apellido ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(agencia) = query.agencia {
        qb.push(" AND e.agencia = ").push_bind(agencia);
    }
    if let Some(activo) = query.activo {
        qb.push(" AND e.activo = ").push_bind(activo);
    }
}

/// Employee repository
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new employee repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List employees with allow-listed filters, newest first
    pub async fn list(
        &self,
        query: &EmployeeListQuery,
        params: PageParams,
    ) -> Result<(Vec<Employee>, i64), sqlx::Error> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM empleados e WHERE 1=1");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM empleados e LEFT JOIN agencias a ON a.id = e.agencia WHERE 1=1",
            SELECT_COLUMNS
        ));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY e.created_at DESC LIMIT ")
            .push_bind(params.limit_i64())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let employees = rows.iter().map(employee_from_row).collect();

        Ok((employees, total))
    }

    /// Find an employee by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM empleados e LEFT JOIN agencias a ON a.id = e.agencia WHERE e.id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(employee_from_row))
    }

    /// Check whether an employee exists
    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM empleados WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    /// Insert a validated employee
    pub async fn create(&self, new: &NewEmployee) -> Result<Employee, sqlx::Error> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO empleados (
                nombre, apellido, ci, sexo, edad, telefono, direccion,
                fecha_nacimiento, fecha_contratacion, puesto, cargo, agencia,
                antecedentes, cargos_anteriores, recomendaciones
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(&new.nombre)
        .bind(&new.apellido)
        .bind(&new.ci)
        .bind(&new.sexo)
        .bind(new.edad)
        .bind(&new.telefono)
        .bind(&new.direccion)
        .bind(new.fecha_nacimiento)
        .bind(new.fecha_contratacion)
        .bind(&new.puesto)
        .bind(&new.cargo)
        .bind(new.agencia)
        .bind(&new.antecedentes)
        .bind(&new.cargos_anteriores)
        .bind(&new.recomendaciones)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE empleados SET
                nombre = COALESCE($2, nombre),
                apellido = COALESCE($3, apellido),
                ci = COALESCE($4, ci),
                sexo = COALESCE($5, sexo),
                edad = COALESCE($6, edad),
                telefono = COALESCE($7, telefono),
                direccion = COALESCE($8, direccion),
                fecha_nacimiento = COALESCE($9, fecha_nacimiento),
                fecha_contratacion = COALESCE($10, fecha_contratacion),
                puesto = COALESCE($11, puesto),
                cargo = COALESCE($12, cargo),
                agencia = COALESCE($13, agencia),
                activo = COALESCE($14, activo),
                antecedentes = COALESCE($15, antecedentes),
                cargos_anteriores = COALESCE($16, cargos_anteriores),
                recomendaciones = COALESCE($17, recomendaciones),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&payload.nombre)
        .bind(&payload.apellido)
        .bind(&payload.ci)
        .bind(&payload.sexo)
        .bind(payload.edad)
        .bind(&payload.telefono)
        .bind(&payload.direccion)
        .bind(payload.fecha_nacimiento)
        .bind(payload.fecha_contratacion)
        .bind(&payload.puesto)
        .bind(&payload.cargo)
        .bind(payload.agencia)
        .bind(payload.activo)
        .bind(&payload.antecedentes)
        .bind(&payload.cargos_anteriores)
        .bind(&payload.recomendaciones)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Soft-delete an employee by flipping the active flag
    ///
    /// The record is kept so attendance, performance, and observation
    /// history stays referentially intact.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE empleados SET activo = FALSE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use common::database::{DatabaseConfig, init_pool};

    async fn test_pool() -> PgPool {
        let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
        init_pool(&config).await.expect("pool should connect")
    }

    fn sample_employee(ci: &str) -> NewEmployee {
        NewEmployee {
            nombre: "Juan".to_string(),
            apellido: "Pérez".to_string(),
            ci: ci.to_string(),
            sexo: "masculino".to_string(),
            edad: Some(30),
            telefono: None,
            direccion: None,
            fecha_nacimiento: None,
            fecha_contratacion: chrono::Utc::now(),
            puesto: "Cajero".to_string(),
            cargo: "Cajero".to_string(),
            agencia: None,
            antecedentes: None,
            cargos_anteriores: None,
            recomendaciones: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_employee_crud_round_trip() {
        let repo = EmployeeRepository::new(test_pool().await);
        let ci = format!("ci-{}", Uuid::new_v4());

        let created = repo.create(&sample_employee(&ci)).await.unwrap();
        assert!(created.activo);
        assert_eq!(created.cargo, "Cajero");

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.ci, ci);

        let payload = UpdateEmployee {
            puesto: Some("Supervisor de caja".to_string()),
            ..Default::default()
        };
        let updated = repo.update(created.id, &payload).await.unwrap().unwrap();
        assert_eq!(updated.puesto, "Supervisor de caja");
        // untouched fields keep their values
        assert_eq!(updated.apellido, "Pérez");

        assert!(repo.soft_delete(created.id).await.unwrap());
        let gone = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(!gone.activo);
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_duplicate_ci_maps_to_conflict() {
        let repo = EmployeeRepository::new(test_pool().await);
        let ci = format!("ci-{}", Uuid::new_v4());

        repo.create(&sample_employee(&ci)).await.unwrap();
        let err = repo.create(&sample_employee(&ci)).await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_unknown_id_is_absent() {
        let repo = EmployeeRepository::new(test_pool().await);
        let id = Uuid::new_v4();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(!repo.soft_delete(id).await.unwrap());
    }
}
