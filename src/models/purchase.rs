//! Modelo de Purchase
//!
//! Una compra agrupa sus boletos y pasa de PENDING_PAYMENT a PAID una sola vez.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la compra - mapea al ENUM purchase_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "purchase_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseStatus {
    PendingPayment,
    Paid,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::PendingPayment => "PENDING_PAYMENT",
            PurchaseStatus::Paid => "PAID",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Purchase {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: PurchaseStatus,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}
