//! Modelo de TerminalUse
//!
//! Tasa de uso de terminal: un registro por boleto confirmado, validado después
//! en el acceso a la terminal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TerminalUse {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub fee_amount: Decimal,
    pub validated: bool,
    pub validated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
