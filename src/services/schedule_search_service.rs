//! Búsqueda pública de horarios y mapa de asientos

use std::collections::{HashMap, HashSet};

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::schedule_dto::{ScheduleSearchResult, SearchQuery, SeatMapResponse, SeatStatus};
use crate::models::pricing_policy::PricingPolicy;
use crate::models::schedule::ScheduleDetail;
use crate::repositories::{PricingPolicyRepository, ScheduleRepository, SeatRepository};
use crate::services::fare_resolver::resolve_selling_price;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::parse_date;

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("El parámetro '{}' es obligatorio.", field)))
}

pub fn to_search_result(detail: ScheduleDetail, policy: Option<&PricingPolicy>) -> ScheduleSearchResult {
    ScheduleSearchResult {
        current_selling_price: resolve_selling_price(&detail.schedule, policy),
        estimated_arrival_time: detail.estimated_arrival_time(),
        detail,
    }
}

pub struct ScheduleSearchService {
    pool: PgPool,
}

impl ScheduleSearchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn search(&self, query: SearchQuery) -> AppResult<Vec<ScheduleSearchResult>> {
        let origin = required(&query.origin, "origin")?;
        let destination = required(&query.destination, "destination")?;
        let date = parse_date(required(&query.date, "date")?, "fecha")?;

        let mut conn = self.pool.acquire().await?;
        let schedules = ScheduleRepository::search(&mut *conn, origin, destination, date).await?;

        if schedules.is_empty() {
            return Err(AppError::NotFound(format!(
                "No se encontraron horarios de {} a {} para el {}.",
                origin, destination, date
            )));
        }

        // Una lectura de política por empresa en esta request
        let mut policies: HashMap<Uuid, Option<PricingPolicy>> = HashMap::new();
        let mut results = Vec::with_capacity(schedules.len());
        for detail in schedules {
            if !policies.contains_key(&detail.company_id) {
                let policy = PricingPolicyRepository::find_by_company(&mut *conn, detail.company_id).await?;
                policies.insert(detail.company_id, policy);
            }
            let policy = policies.get(&detail.company_id).and_then(Option::as_ref);
            results.push(to_search_result(detail, policy));
        }

        log::info!("🔎 Búsqueda {} → {} ({}): {} horario(s)", origin, destination, date, results.len());
        Ok(results)
    }

    pub async fn seat_map(&self, schedule_id: Uuid) -> AppResult<SeatMapResponse> {
        let mut conn = self.pool.acquire().await?;

        let detail = ScheduleRepository::find_detail(&mut *conn, schedule_id)
            .await?
            .filter(|detail| detail.first_inactive().is_none())
            .ok_or_else(|| not_found_error("Schedule", &schedule_id.to_string()))?;

        let seats = load_seat_statuses(&mut conn, &detail).await?;
        if seats.is_empty() {
            return Err(AppError::NotFound(format!(
                "El bus {} no tiene asientos configurados.",
                detail.bus_plate
            )));
        }

        let policy = PricingPolicyRepository::find_by_company(&mut *conn, detail.company_id).await?;

        Ok(SeatMapResponse {
            schedule: to_search_result(detail, policy.as_ref()),
            seats,
        })
    }
}

async fn load_seat_statuses(conn: &mut PgConnection, detail: &ScheduleDetail) -> AppResult<Vec<SeatStatus>> {
    let seats = SeatRepository::list_for_bus(conn, detail.schedule.bus_id).await?;
    let occupied: HashSet<i32> = SeatRepository::occupied_seat_numbers(conn, detail.schedule.id)
        .await?
        .into_iter()
        .collect();

    Ok(seats
        .into_iter()
        .map(|seat| SeatStatus {
            occupied_in_schedule: occupied.contains(&seat.seat_number),
            seat,
        })
        .collect())
}
