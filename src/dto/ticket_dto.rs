use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ticket::TicketWithTrip;

// Filtros de "mis boletos": status y rango de fechas de compra (YYYY-MM-DD)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MyTicketsQuery {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

// Filtros de boletos vendidos por la empresa; fechas de compra (YYYY-MM-DD)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoldTicketsQuery {
    pub route_id: Option<Uuid>,
    pub schedule_id: Option<Uuid>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MyTicketsResponse {
    pub total: usize,
    pub tickets: Vec<TicketWithTrip>,
}

#[derive(Debug, Serialize)]
pub struct DigitalTicketResponse {
    pub ticket: TicketWithTrip,
}

#[derive(Debug, Serialize)]
pub struct SoldTicketsResponse {
    pub company_id: Uuid,
    pub total: usize,
    pub tickets: Vec<TicketWithTrip>,
}
