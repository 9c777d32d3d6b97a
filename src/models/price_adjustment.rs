//! Historial de ajustes de precio (solo se agregan registros)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de ajuste - mapea al ENUM price_adjustment_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "price_adjustment_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    Ai,
    ManualCompanyAdmin,
    ManualTerminalAdmin,
    Promotional,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceAdjustment {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub predicted_price: Option<Decimal>,
    pub final_price: Decimal,
    pub adjusted_at: DateTime<Utc>,
    pub adjustment_type: AdjustmentType,
    pub adjusted_by: Option<Uuid>,
}
