//! Modelo de Route
//!
//! Ruta de una empresa (origen → destino). Es dato de referencia: la
//! administración de horarios solo verifica propiedad y estado.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub estimated_duration: Option<NaiveTime>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
