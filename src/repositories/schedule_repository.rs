use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::schedule::{NewSchedule, Schedule, ScheduleChanges, ScheduleDetail};
use crate::utils::errors::AppError;

const DETAIL_SELECT: &str = r#"
    SELECT
        s.id, s.route_id, s.bus_id, s.departure_date, s.departure_time,
        s.base_price, s.ai_suggested_price, s.manually_overridden, s.active,
        s.created_at, s.updated_at,
        r.name AS route_name, r.origin, r.destination, r.estimated_duration,
        r.active AS route_active,
        c.id AS company_id, c.name AS company_name, c.active AS company_active,
        b.plate AS bus_plate, b.model AS bus_model, b.active AS bus_active
    FROM schedules s
    JOIN routes r ON r.id = s.route_id
    JOIN companies c ON c.id = r.company_id
    JOIN buses b ON b.id = s.bus_id
"#;

/// Escapa comodines de LIKE en texto del usuario
fn like_pattern(value: &str) -> String {
    let escaped = value
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Filtros del listado de horarios de una empresa; fechas de salida inclusivas
#[derive(Debug, Clone, Default)]
pub struct CompanyScheduleFilter {
    pub route_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub struct ScheduleRepository;

impl ScheduleRepository {
    pub async fn find_detail(conn: &mut PgConnection, id: Uuid) -> Result<Option<ScheduleDetail>, AppError> {
        let sql = format!("{} WHERE s.id = $1", DETAIL_SELECT);
        let detail = sqlx::query_as::<_, ScheduleDetail>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(detail)
    }

    /// Lectura con bloqueo compartido: nadie desactiva ni reprecia el horario mientras se compra
    pub async fn find_detail_for_share(conn: &mut PgConnection, id: Uuid) -> Result<Option<ScheduleDetail>, AppError> {
        let sql = format!("{} WHERE s.id = $1 FOR SHARE OF s", DETAIL_SELECT);
        let detail = sqlx::query_as::<_, ScheduleDetail>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(detail)
    }

    pub async fn lock_detail_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Option<ScheduleDetail>, AppError> {
        let sql = format!("{} WHERE s.id = $1 FOR UPDATE OF s", DETAIL_SELECT);
        let detail = sqlx::query_as::<_, ScheduleDetail>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(detail)
    }

    /// Horarios vendibles para origen/destino (subcadena, sin mayúsculas) en una fecha
    pub async fn search(
        conn: &mut PgConnection,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
    ) -> Result<Vec<ScheduleDetail>, AppError> {
        let sql = format!(
            r#"{}
            WHERE s.departure_date = $3
              AND s.active AND r.active AND b.active AND c.active
              AND r.origin ILIKE $1
              AND r.destination ILIKE $2
            ORDER BY s.departure_time ASC
            "#,
            DETAIL_SELECT
        );

        let schedules = sqlx::query_as::<_, ScheduleDetail>(&sql)
            .bind(like_pattern(origin))
            .bind(like_pattern(destination))
            .bind(departure_date)
            .fetch_all(&mut *conn)
            .await?;

        Ok(schedules)
    }

    pub async fn create(conn: &mut PgConnection, schedule: &NewSchedule) -> Result<Schedule, AppError> {
        let created = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (
                id, route_id, bus_id, departure_date, departure_time,
                base_price, manually_overridden, active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(schedule.route_id)
        .bind(schedule.bus_id)
        .bind(schedule.departure_date)
        .bind(schedule.departure_time)
        .bind(schedule.base_price)
        .bind(schedule.active)
        .fetch_one(&mut *conn)
        .await?;

        Ok(created)
    }

    /// Horarios de las rutas de la empresa, activos o no, por fecha y hora de salida
    pub async fn list_for_company(
        conn: &mut PgConnection,
        company_id: Uuid,
        filter: &CompanyScheduleFilter,
    ) -> Result<Vec<ScheduleDetail>, AppError> {
        let sql = format!(
            r#"{}
            WHERE c.id = $1
              AND ($2::uuid IS NULL OR s.route_id = $2)
              AND ($3::date IS NULL OR s.departure_date >= $3)
              AND ($4::date IS NULL OR s.departure_date <= $4)
            ORDER BY s.departure_date ASC, s.departure_time ASC
            "#,
            DETAIL_SELECT
        );

        let schedules = sqlx::query_as::<_, ScheduleDetail>(&sql)
            .bind(company_id)
            .bind(filter.route_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(&mut *conn)
            .await?;

        Ok(schedules)
    }

    /// Aplica los campos presentes; los ausentes conservan su valor
    pub async fn update(conn: &mut PgConnection, id: Uuid, changes: &ScheduleChanges) -> Result<Schedule, AppError> {
        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            UPDATE schedules
            SET route_id = COALESCE($2, route_id),
                bus_id = COALESCE($3, bus_id),
                departure_date = COALESCE($4, departure_date),
                departure_time = COALESCE($5, departure_time),
                base_price = COALESCE($6, base_price),
                active = COALESCE($7, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.route_id)
        .bind(changes.bus_id)
        .bind(changes.departure_date)
        .bind(changes.departure_time)
        .bind(changes.base_price)
        .bind(changes.active)
        .fetch_one(&mut *conn)
        .await?;

        Ok(schedule)
    }

    /// Baja lógica: los horarios nunca se borran
    pub async fn deactivate(conn: &mut PgConnection, id: Uuid) -> Result<Schedule, AppError> {
        let schedule = sqlx::query_as::<_, Schedule>(
            "UPDATE schedules SET active = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(schedule)
    }

    /// Fija el precio manual; el precio sugerido por IA se conserva como histórico
    pub async fn set_manual_price(conn: &mut PgConnection, id: Uuid, new_price: Decimal) -> Result<Schedule, AppError> {
        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            UPDATE schedules
            SET base_price = $2, manually_overridden = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_price)
        .fetch_one(&mut *conn)
        .await?;

        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" Tunja "), "%Tunja%");
        assert_eq!(like_pattern("100%_bus"), "%100\\%\\_bus%");
    }
}
