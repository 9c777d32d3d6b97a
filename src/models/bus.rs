use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Bus principal - mapea exactamente a la tabla buses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bus {
    pub id: Uuid,
    pub company_id: Uuid,
    pub plate: String,
    pub model: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
