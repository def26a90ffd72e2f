//! Attendance model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attendance kinds accepted by `tipoAsistencia`
pub const TIPOS_ASISTENCIA: &[&str] =
    &["presente", "ausente", "permiso", "vacaciones", "licencia"];

/// Attendance record as stored in the `asistencias` table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Uuid,
    pub empleado: Uuid,
    pub fecha: DateTime<Utc>,
    pub hora_entrada: Option<DateTime<Utc>>,
    pub hora_salida: Option<DateTime<Utc>>,
    pub tipo_asistencia: String,
    pub observaciones: Option<String>,
    /// User who recorded the entry
    pub registrado_por: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Attendance creation payload; `registradoPor` is always taken from the
/// authenticated identity, never from the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendance {
    pub empleado: Option<Uuid>,
    pub fecha: Option<DateTime<Utc>>,
    pub hora_entrada: Option<DateTime<Utc>>,
    pub hora_salida: Option<DateTime<Utc>>,
    /// Defaults to `presente`
    pub tipo_asistencia: Option<String>,
    pub observaciones: Option<String>,
}

/// Validated attendance payload, ready for insertion
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub empleado: Uuid,
    pub fecha: DateTime<Utc>,
    pub hora_entrada: Option<DateTime<Utc>>,
    pub hora_salida: Option<DateTime<Utc>>,
    pub tipo_asistencia: String,
    pub observaciones: Option<String>,
}

/// Attendance partial-update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendance {
    pub fecha: Option<DateTime<Utc>>,
    pub hora_entrada: Option<DateTime<Utc>>,
    pub hora_salida: Option<DateTime<Utc>>,
    pub tipo_asistencia: Option<String>,
    pub observaciones: Option<String>,
}

/// Allow-listed filters for the attendance list
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Exact match on the employee id
    pub empleado: Option<Uuid>,
    /// Exact match on the attendance kind
    pub tipo: Option<String>,
    /// Inclusive lower bound on `fecha`
    pub desde: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `fecha`
    pub hasta: Option<DateTime<Utc>>,
}
