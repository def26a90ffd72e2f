//! Performance review model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Performance review as stored in the `desempenos` table
///
/// The three ratings are 1-5 scores for punctuality, initiative, and
/// service quality.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub id: Uuid,
    pub empleado: Uuid,
    pub fecha: DateTime<Utc>,
    pub puntualidad: i32,
    pub proactividad: i32,
    pub calidad_servicio: i32,
    pub observaciones: Option<String>,
    pub evaluacion_personal: Option<String>,
    /// User who performed the evaluation
    pub evaluador: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Performance creation payload; `evaluador` is always the authenticated
/// identity
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerformance {
    pub empleado: Option<Uuid>,
    pub fecha: Option<DateTime<Utc>>,
    /// Each rating defaults to 3 when absent
    pub puntualidad: Option<i32>,
    pub proactividad: Option<i32>,
    pub calidad_servicio: Option<i32>,
    pub observaciones: Option<String>,
    pub evaluacion_personal: Option<String>,
}

/// Validated performance payload, ready for insertion
#[derive(Debug, Clone)]
pub struct NewPerformance {
    pub empleado: Uuid,
    pub fecha: DateTime<Utc>,
    pub puntualidad: i32,
    pub proactividad: i32,
    pub calidad_servicio: i32,
    pub observaciones: Option<String>,
    pub evaluacion_personal: Option<String>,
}

/// Performance partial-update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerformance {
    pub fecha: Option<DateTime<Utc>>,
    pub puntualidad: Option<i32>,
    pub proactividad: Option<i32>,
    pub calidad_servicio: Option<i32>,
    pub observaciones: Option<String>,
    pub evaluacion_personal: Option<String>,
}

/// Allow-listed filters for the performance list
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Exact match on the employee id
    pub empleado: Option<Uuid>,
    /// Exact match on the evaluating user id
    pub evaluador: Option<Uuid>,
    /// Inclusive lower bound on `fecha`
    pub desde: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `fecha`
    pub hasta: Option<DateTime<Utc>>,
}
