//! Agency model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Agency entity as stored in the `agencias` table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub ciudad: String,
    pub telefono: Option<String>,
    /// Optional manager reference to a user account
    pub encargado: Option<Uuid>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

/// Agency creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgency {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub telefono: Option<String>,
    pub encargado: Option<Uuid>,
}

/// Validated agency payload, ready for insertion
#[derive(Debug, Clone)]
pub struct NewAgency {
    pub nombre: String,
    pub direccion: String,
    pub ciudad: String,
    pub telefono: Option<String>,
    pub encargado: Option<Uuid>,
}

/// Agency partial-update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgency {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub telefono: Option<String>,
    pub encargado: Option<Uuid>,
    pub activo: Option<bool>,
}

/// Allow-listed filters for the agency list
#[derive(Debug, Clone, Deserialize)]
pub struct AgencyListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Case-insensitive substring match over nombre and ciudad
    pub search: Option<String>,
    pub activo: Option<bool>,
}
