//! Modelo de Ticket (boleto)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, Type};
use uuid::Uuid;

/// Estado del boleto - mapea al ENUM ticket_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ticket_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    PendingPayment,
    Confirmed,
    Cancelled,
    Annulled,
}

impl TicketStatus {
    /// Un boleto ocupa su asiento salvo que esté cancelado o anulado.
    /// PENDING_PAYMENT también ocupa: cubre la ventana entre elegir y pagar.
    pub fn occupies_seat(&self) -> bool {
        !matches!(self, TicketStatus::Cancelled | TicketStatus::Annulled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::PendingPayment => "PENDING_PAYMENT",
            TicketStatus::Confirmed => "CONFIRMED",
            TicketStatus::Cancelled => "CANCELLED",
            TicketStatus::Annulled => "ANNULLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PENDING_PAYMENT" => Some(TicketStatus::PendingPayment),
            "CONFIRMED" => Some(TicketStatus::Confirmed),
            "CANCELLED" => Some(TicketStatus::Cancelled),
            "ANNULLED" => Some(TicketStatus::Annulled),
            _ => None,
        }
    }
}

/// Contenido del código QR que se entrega al confirmar el pago
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketQrPayload {
    pub ticket_id: Uuid,
    pub schedule_id: Uuid,
    pub seat_number: i32,
    pub passenger_document: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub passenger_id: Uuid,
    pub schedule_id: Uuid,
    pub seat_configuration_id: Uuid,
    pub purchase_id: Uuid,
    pub seat_number: i32,
    pub final_price: Decimal,
    pub status: TicketStatus,
    pub qr_code: Option<Json<TicketQrPayload>>,
    pub created_at: DateTime<Utc>,
}

/// Boleto con su viaje, pasajero y compra; usado en "mis boletos" y en el boleto digital
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TicketWithTrip {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(skip)]
    pub buyer_id: Uuid,
    pub purchase_status: super::purchase::PurchaseStatus,
    pub payment_method: Option<String>,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub route_name: String,
    pub origin: String,
    pub destination: String,
    pub company_name: String,
    pub bus_plate: String,
    pub passenger_name: String,
    pub passenger_surname: String,
    pub document_type: String,
    pub document_number: String,
}
