//! Modelo de Schedule (horario de salida)
//!
//! Un horario es una salida concreta de un bus sobre una ruta. Los campos de
//! precio los modifica el ajuste manual o el job externo de precios IA.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Schedule principal - mapea exactamente a la tabla schedules
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub id: Uuid,
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub base_price: Decimal,
    pub ai_suggested_price: Option<Decimal>,
    pub manually_overridden: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// Fecha y hora de salida combinadas
    pub fn departure_at(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.departure_time)
    }
}

/// Datos de un horario nuevo
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub base_price: Decimal,
    pub active: bool,
}

/// Cambios parciales: solo los campos presentes se modifican
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleChanges {
    pub route_id: Option<Uuid>,
    pub bus_id: Option<Uuid>,
    pub departure_date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub base_price: Option<Decimal>,
    pub active: Option<bool>,
}

/// Horario junto con su ruta, bus y empresa
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScheduleDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub schedule: Schedule,
    pub route_name: String,
    pub origin: String,
    pub destination: String,
    pub estimated_duration: Option<NaiveTime>,
    pub route_active: bool,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_active: bool,
    pub bus_plate: String,
    pub bus_model: Option<String>,
    pub bus_active: bool,
}

impl ScheduleDetail {
    /// Hora estimada de llegada (HH:MM) a partir de la duración de la ruta
    pub fn estimated_arrival_time(&self) -> Option<String> {
        let duration = self.estimated_duration?;
        let elapsed = Duration::seconds(i64::from(duration.num_seconds_from_midnight()));
        let arrival = self.schedule.departure_at() + elapsed;
        Some(arrival.format("%H:%M").to_string())
    }

    /// Nombre del primer recurso inactivo en la cadena horario → ruta → bus → empresa
    pub fn first_inactive(&self) -> Option<&'static str> {
        if !self.schedule.active {
            Some("horario")
        } else if !self.route_active {
            Some("ruta")
        } else if !self.bus_active {
            Some("bus")
        } else if !self.company_active {
            Some("empresa")
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_estimated_arrival_crosses_midnight() {
        let detail = detail(schedule(50000, None, false));
        assert_eq!(detail.estimated_arrival_time().as_deref(), Some("01:15"));
    }

    #[test]
    fn test_estimated_arrival_without_duration() {
        let mut detail = detail(schedule(50000, None, false));
        detail.estimated_duration = None;
        assert_eq!(detail.estimated_arrival_time(), None);
    }

    #[test]
    fn test_first_inactive_follows_chain_order() {
        let mut detail = detail(schedule(50000, None, false));
        assert_eq!(detail.first_inactive(), None);

        detail.company_active = false;
        assert_eq!(detail.first_inactive(), Some("empresa"));

        detail.route_active = false;
        assert_eq!(detail.first_inactive(), Some("ruta"));

        detail.schedule.active = false;
        assert_eq!(detail.first_inactive(), Some("horario"));
    }
}
