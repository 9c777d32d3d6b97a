use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::price_adjustment::PriceAdjustment;
use crate::models::schedule::{Schedule, ScheduleDetail};
use crate::models::seat::SeatConfiguration;

// Query de búsqueda pública; los campos faltantes se reportan como 400
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
}

// Horario con el precio vigente y la llegada estimada
#[derive(Debug, Serialize)]
pub struct ScheduleSearchResult {
    #[serde(flatten)]
    pub detail: ScheduleDetail,
    pub current_selling_price: Decimal,
    pub estimated_arrival_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeatStatus {
    #[serde(flatten)]
    pub seat: SeatConfiguration,
    pub occupied_in_schedule: bool,
}

#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub schedule: ScheduleSearchResult,
    pub seats: Vec<SeatStatus>,
}

// Request para ajustar manualmente el precio
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdjustPriceRequest {
    pub new_final_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct AdjustPriceResponse {
    pub message: String,
    pub schedule: Schedule,
    pub adjustment: PriceAdjustment,
}

#[derive(Debug, Serialize)]
pub struct PriceHistoryResponse {
    pub schedule_id: Uuid,
    pub total: usize,
    pub adjustments: Vec<PriceAdjustment>,
}

fn default_active() -> bool {
    true
}

// Request para crear un horario (hora en formato HH:MM:SS)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub base_price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

// Request de actualización parcial; los campos omitidos no cambian
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateScheduleRequest {
    #[serde(default)]
    pub route_id: Option<Uuid>,
    #[serde(default)]
    pub bus_id: Option<Uuid>,
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub departure_time: Option<NaiveTime>,
    #[serde(default)]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl UpdateScheduleRequest {
    pub fn is_empty(&self) -> bool {
        self.route_id.is_none()
            && self.bus_id.is_none()
            && self.departure_date.is_none()
            && self.departure_time.is_none()
            && self.base_price.is_none()
            && self.active.is_none()
    }
}

// Filtros del listado de horarios de la empresa (fechas de salida YYYY-MM-DD)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanySchedulesQuery {
    pub route_id: Option<Uuid>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub message: String,
    pub schedule: ScheduleDetail,
}

#[derive(Debug, Serialize)]
pub struct CompanySchedulesResponse {
    pub total: usize,
    pub schedules: Vec<ScheduleDetail>,
}
