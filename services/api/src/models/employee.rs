//! Employee model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee entity as stored in the `empleados` table
///
/// `agencia_nombre` is joined in from the linked agency for list and detail
/// responses; it is not a stored column.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub ci: String,
    pub sexo: String,
    pub edad: Option<i32>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub fecha_nacimiento: Option<DateTime<Utc>>,
    pub fecha_contratacion: DateTime<Utc>,
    pub puesto: String,
    pub cargo: String,
    pub agencia: Option<Uuid>,
    pub agencia_nombre: Option<String>,
    pub activo: bool,
    pub antecedentes: Option<String>,
    pub cargos_anteriores: Option<String>,
    pub recomendaciones: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee creation payload
///
/// Required fields are optional here so that validation can report every
/// missing field with a 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub ci: Option<String>,
    pub sexo: Option<String>,
    pub edad: Option<i32>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub fecha_nacimiento: Option<DateTime<Utc>>,
    pub fecha_contratacion: Option<DateTime<Utc>>,
    pub puesto: Option<String>,
    /// Defaults to `puesto` when absent
    pub cargo: Option<String>,
    pub agencia: Option<Uuid>,
    pub antecedentes: Option<String>,
    pub cargos_anteriores: Option<String>,
    pub recomendaciones: Option<String>,
}

/// Validated employee payload, ready for insertion
///
/// Built by the validation layer; `cargo` has already been defaulted from
/// `puesto` when it was absent.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub nombre: String,
    pub apellido: String,
    pub ci: String,
    pub sexo: String,
    pub edad: Option<i32>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub fecha_nacimiento: Option<DateTime<Utc>>,
    pub fecha_contratacion: DateTime<Utc>,
    pub puesto: String,
    pub cargo: String,
    pub agencia: Option<Uuid>,
    pub antecedentes: Option<String>,
    pub cargos_anteriores: Option<String>,
    pub recomendaciones: Option<String>,
}

/// Employee partial-update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub ci: Option<String>,
    pub sexo: Option<String>,
    pub edad: Option<i32>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub fecha_nacimiento: Option<DateTime<Utc>>,
    pub fecha_contratacion: Option<DateTime<Utc>>,
    pub puesto: Option<String>,
    pub cargo: Option<String>,
    pub agencia: Option<Uuid>,
    pub activo: Option<bool>,
    pub antecedentes: Option<String>,
    pub cargos_anteriores: Option<String>,
    pub recomendaciones: Option<String>,
}

/// Allow-listed filters for the employee list
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Case-insensitive substring match over nombre and apellido
    pub search: Option<String>,
    /// Exact match on the linked agency id
    pub agencia: Option<Uuid>,
    pub activo: Option<bool>,
}
