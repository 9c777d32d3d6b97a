//! Administración de horarios de la empresa
//!
//! Alta, listado, actualización parcial y desactivación. Un horario nunca se
//! borra; su ruta y su bus deben pertenecer a la empresa y estar activos.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::schedule_dto::{CompanySchedulesQuery, CreateScheduleRequest, UpdateScheduleRequest};
use crate::models::auth::AuthenticatedUser;
use crate::models::schedule::{NewSchedule, ScheduleChanges, ScheduleDetail};
use crate::repositories::schedule_repository::CompanyScheduleFilter;
use crate::repositories::{BusRepository, RouteRepository, ScheduleRepository};
use crate::services::authorization_service::{company_scope, own_company};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{normalize_price, parse_date_range};

/// La salida programada no puede quedar en el pasado
pub fn check_future_departure(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> Result<(), AppError> {
    if date.and_time(time) <= now {
        return Err(AppError::Validation(format!(
            "La fecha y hora de salida ({} {}) no pueden estar en el pasado.",
            date, time
        )));
    }
    Ok(())
}

/// Ruta o bus asignable: existe, es de la empresa y está activo.
/// `found` es `(empresa dueña, activo)`.
pub fn check_assignable(
    kind: &str,
    id: Uuid,
    found: Option<(Uuid, bool)>,
    company_id: Uuid,
) -> Result<(), AppError> {
    match found {
        Some((owner, _)) if owner != company_id => Err(AppError::NotFound(format!(
            "{} {} no encontrado o no pertenece a la empresa.",
            kind, id
        ))),
        Some((_, false)) => Err(AppError::InactiveResource(format!(
            "{} {} no está activo.",
            kind, id
        ))),
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!(
            "{} {} no encontrado o no pertenece a la empresa.",
            kind, id
        ))),
    }
}

async fn check_route(conn: &mut PgConnection, route_id: Uuid, company_id: Uuid) -> AppResult<()> {
    let route = RouteRepository::find_by_id(conn, route_id).await?;
    check_assignable("Ruta", route_id, route.map(|r| (r.company_id, r.active)), company_id)
}

async fn check_bus(conn: &mut PgConnection, bus_id: Uuid, company_id: Uuid) -> AppResult<()> {
    let bus = BusRepository::find_by_id(conn, bus_id).await?;
    check_assignable("Bus", bus_id, bus.map(|b| (b.company_id, b.active)), company_id)
}

pub struct ScheduleAdminService {
    pool: PgPool,
}

impl ScheduleAdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_schedule(
        &self,
        actor: &AuthenticatedUser,
        request: CreateScheduleRequest,
    ) -> AppResult<ScheduleDetail> {
        let company_id = own_company(actor, "crear horarios")?;
        let base_price = normalize_price(request.base_price, "precio base")?;
        check_future_departure(request.departure_date, request.departure_time, Local::now().naive_local())?;

        let mut tx = self.pool.begin().await?;

        check_route(&mut *tx, request.route_id, company_id).await?;
        check_bus(&mut *tx, request.bus_id, company_id).await?;

        let schedule = ScheduleRepository::create(
            &mut *tx,
            &NewSchedule {
                route_id: request.route_id,
                bus_id: request.bus_id,
                departure_date: request.departure_date,
                departure_time: request.departure_time,
                base_price,
                active: request.active,
            },
        )
        .await?;
        let detail = ScheduleRepository::find_detail(&mut *tx, schedule.id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Horario {} recién creado no encontrado", schedule.id)))?;

        tx.commit().await?;

        log::info!(
            "🗓️ Horario {} creado: {} {} {} por {}",
            detail.schedule.id,
            detail.route_name,
            detail.schedule.departure_date,
            detail.schedule.departure_time,
            actor.id
        );

        Ok(detail)
    }

    pub async fn list_company_schedules(
        &self,
        actor: &AuthenticatedUser,
        query: &CompanySchedulesQuery,
    ) -> AppResult<Vec<ScheduleDetail>> {
        let company_id = own_company(actor, "listar horarios")?;
        let (from, to) = parse_date_range(query.from.as_deref(), query.to.as_deref())?;
        let filter = CompanyScheduleFilter { route_id: query.route_id, from, to };

        let mut conn = self.pool.acquire().await?;
        ScheduleRepository::list_for_company(&mut *conn, company_id, &filter).await
    }

    pub async fn update_schedule(
        &self,
        actor: &AuthenticatedUser,
        schedule_id: Uuid,
        request: UpdateScheduleRequest,
    ) -> AppResult<ScheduleDetail> {
        if request.is_empty() {
            return Err(AppError::Validation("No se indicó ningún campo para actualizar.".to_string()));
        }
        let base_price = request
            .base_price
            .map(|price| normalize_price(price, "precio base"))
            .transpose()?;

        let mut tx = self.pool.begin().await?;

        let current = ScheduleRepository::lock_detail_for_update(&mut *tx, schedule_id)
            .await?
            .ok_or_else(|| not_found_error("Schedule", &schedule_id.to_string()))?;
        company_scope(actor, current.company_id, "modificar el horario")?;

        let date = request.departure_date.unwrap_or(current.schedule.departure_date);
        let time = request.departure_time.unwrap_or(current.schedule.departure_time);
        // Solo se valida la salida cuando cambia
        if date.and_time(time) != current.schedule.departure_at() {
            check_future_departure(date, time, Local::now().naive_local())?;
        }

        if let Some(route_id) = request.route_id.filter(|id| *id != current.schedule.route_id) {
            check_route(&mut *tx, route_id, current.company_id).await?;
        }
        if let Some(bus_id) = request.bus_id.filter(|id| *id != current.schedule.bus_id) {
            check_bus(&mut *tx, bus_id, current.company_id).await?;
        }

        let changes = ScheduleChanges {
            route_id: request.route_id,
            bus_id: request.bus_id,
            departure_date: request.departure_date,
            departure_time: request.departure_time,
            base_price,
            active: request.active,
        };
        ScheduleRepository::update(&mut *tx, schedule_id, &changes).await?;
        let detail = ScheduleRepository::find_detail(&mut *tx, schedule_id)
            .await?
            .ok_or_else(|| not_found_error("Schedule", &schedule_id.to_string()))?;

        tx.commit().await?;

        log::info!("✏️ Horario {} actualizado por {}", schedule_id, actor.id);
        Ok(detail)
    }

    pub async fn deactivate_schedule(
        &self,
        actor: &AuthenticatedUser,
        schedule_id: Uuid,
    ) -> AppResult<ScheduleDetail> {
        let mut tx = self.pool.begin().await?;

        let current = ScheduleRepository::lock_detail_for_update(&mut *tx, schedule_id)
            .await?
            .ok_or_else(|| not_found_error("Schedule", &schedule_id.to_string()))?;
        company_scope(actor, current.company_id, "desactivar el horario")?;

        ScheduleRepository::deactivate(&mut *tx, schedule_id).await?;
        let detail = ScheduleRepository::find_detail(&mut *tx, schedule_id)
            .await?
            .ok_or_else(|| not_found_error("Schedule", &schedule_id.to_string()))?;

        tx.commit().await?;

        log::info!("🚫 Horario {} desactivado por {}", schedule_id, actor.id);
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        )
    }

    #[test]
    fn test_departure_must_be_in_the_future() {
        let (today, noon) = at("2026-06-10", "12:00");
        let now = today.and_time(noon);

        let (date, time) = at("2026-06-10", "12:30");
        assert!(check_future_departure(date, time, now).is_ok());

        assert!(matches!(check_future_departure(today, noon, now), Err(AppError::Validation(_))));
        let (yesterday, morning) = at("2026-06-09", "08:00");
        assert!(check_future_departure(yesterday, morning, now).is_err());
    }

    #[test]
    fn test_assignable_requires_same_company_and_active() {
        let company_id = Uuid::new_v4();
        let id = Uuid::new_v4();

        assert!(check_assignable("Ruta", id, Some((company_id, true)), company_id).is_ok());
        assert!(matches!(
            check_assignable("Ruta", id, Some((Uuid::new_v4(), true)), company_id),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            check_assignable("Bus", id, Some((company_id, false)), company_id),
            Err(AppError::InactiveResource(_))
        ));
        assert!(matches!(check_assignable("Bus", id, None, company_id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_other_company_inactive_resource_reads_as_missing() {
        let company_id = Uuid::new_v4();
        let foreign_inactive = check_assignable("Ruta", Uuid::new_v4(), Some((Uuid::new_v4(), false)), company_id);
        assert!(matches!(foreign_inactive, Err(AppError::NotFound(_))));
    }
}
