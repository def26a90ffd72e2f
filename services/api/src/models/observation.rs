//! Observation model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Observation kinds accepted by `tipo`
pub const TIPOS_OBSERVACION: &[&str] = &["positiva", "negativa", "neutral"];

/// Observation as stored in the `observaciones` table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: Uuid,
    pub empleado: Uuid,
    pub fecha: DateTime<Utc>,
    pub tipo: String,
    pub titulo: String,
    pub descripcion: String,
    pub desarrollo: Option<String>,
    /// User who recorded the observation
    pub registrado_por: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Observation creation payload; `registradoPor` is always the
/// authenticated identity
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObservation {
    pub empleado: Option<Uuid>,
    pub fecha: Option<DateTime<Utc>>,
    /// Defaults to `neutral`
    pub tipo: Option<String>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub desarrollo: Option<String>,
}

/// Validated observation payload, ready for insertion
#[derive(Debug, Clone)]
pub struct NewObservation {
    pub empleado: Uuid,
    pub fecha: DateTime<Utc>,
    pub tipo: String,
    pub titulo: String,
    pub descripcion: String,
    pub desarrollo: Option<String>,
}

/// Observation partial-update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateObservation {
    pub fecha: Option<DateTime<Utc>>,
    pub tipo: Option<String>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub desarrollo: Option<String>,
}

/// Allow-listed filters for the observation list
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Exact match on the employee id
    pub empleado: Option<Uuid>,
    /// Exact match on the observation kind
    pub tipo: Option<String>,
    /// Inclusive lower bound on `fecha`
    pub desde: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `fecha`
    pub hasta: Option<DateTime<Utc>>,
}
