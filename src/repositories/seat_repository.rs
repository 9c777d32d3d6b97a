use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::seat::SeatConfiguration;
use crate::models::ticket::TicketStatus;
use crate::utils::errors::AppError;

pub struct SeatRepository;

impl SeatRepository {
    /// Bloquea la configuración del asiento; serializa compradores concurrentes del mismo asiento
    pub async fn lock_seat(
        conn: &mut PgConnection,
        bus_id: Uuid,
        seat_number: i32,
    ) -> Result<Option<SeatConfiguration>, AppError> {
        let seat = sqlx::query_as::<_, SeatConfiguration>(
            r#"
            SELECT * FROM seat_configurations
            WHERE bus_id = $1 AND seat_number = $2
            FOR UPDATE
            "#,
        )
        .bind(bus_id)
        .bind(seat_number)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(seat)
    }

    pub async fn list_for_bus(conn: &mut PgConnection, bus_id: Uuid) -> Result<Vec<SeatConfiguration>, AppError> {
        let seats = sqlx::query_as::<_, SeatConfiguration>(
            "SELECT * FROM seat_configurations WHERE bus_id = $1 ORDER BY floor ASC, seat_number ASC",
        )
        .bind(bus_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(seats)
    }

    /// Estados de los boletos existentes para (horario, asiento)
    pub async fn ticket_statuses(
        conn: &mut PgConnection,
        schedule_id: Uuid,
        seat_number: i32,
    ) -> Result<Vec<TicketStatus>, AppError> {
        let statuses: Vec<(TicketStatus,)> = sqlx::query_as(
            "SELECT status FROM tickets WHERE schedule_id = $1 AND seat_number = $2",
        )
        .bind(schedule_id)
        .bind(seat_number)
        .fetch_all(&mut *conn)
        .await?;

        Ok(statuses.into_iter().map(|(status,)| status).collect())
    }

    /// Números de asiento ocupados (boletos ni cancelados ni anulados) en un horario
    pub async fn occupied_seat_numbers(conn: &mut PgConnection, schedule_id: Uuid) -> Result<Vec<i32>, AppError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r#"
            SELECT seat_number FROM tickets
            WHERE schedule_id = $1 AND status NOT IN ('CANCELLED', 'ANNULLED')
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(|(seat,)| seat).collect())
    }
}
