use rust_decimal::Decimal;
use sqlx::{types::Json, PgConnection};
use uuid::Uuid;

use crate::models::ticket::{Ticket, TicketQrPayload, TicketStatus, TicketWithTrip};
use crate::utils::errors::AppError;

const TRIP_SELECT: &str = r#"
    SELECT
        t.id, t.passenger_id, t.schedule_id, t.seat_configuration_id, t.purchase_id,
        t.seat_number, t.final_price, t.status, t.qr_code, t.created_at,
        pu.buyer_id, pu.status AS purchase_status, pu.payment_method,
        s.departure_date, s.departure_time,
        r.name AS route_name, r.origin, r.destination,
        c.name AS company_name, b.plate AS bus_plate,
        pa.name AS passenger_name, pa.surname AS passenger_surname,
        pa.document_type, pa.document_number
    FROM tickets t
    JOIN purchases pu ON pu.id = t.purchase_id
    JOIN schedules s ON s.id = t.schedule_id
    JOIN routes r ON r.id = s.route_id
    JOIN companies c ON c.id = r.company_id
    JOIN buses b ON b.id = s.bus_id
    JOIN passengers pa ON pa.id = t.passenger_id
"#;

/// Datos de un boleto recién reservado
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub passenger_id: Uuid,
    pub schedule_id: Uuid,
    pub seat_configuration_id: Uuid,
    pub purchase_id: Uuid,
    pub seat_number: i32,
    pub final_price: Decimal,
}

/// Filtros de "mis boletos"; las fechas acotan el día de la compra (inclusive)
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

/// Filtros del listado de boletos vendidos de una empresa
#[derive(Debug, Clone, Default)]
pub struct SoldTicketFilter {
    pub route_id: Option<Uuid>,
    pub schedule_id: Option<Uuid>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

pub struct TicketRepository;

impl TicketRepository {
    /// Inserta en PENDING_PAYMENT; choque con el índice de asientos activos => SeatOccupied
    pub async fn create(conn: &mut PgConnection, ticket: &NewTicket) -> Result<Ticket, AppError> {
        sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (
                id, passenger_id, schedule_id, seat_configuration_id, purchase_id,
                seat_number, final_price, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ticket.passenger_id)
        .bind(ticket.schedule_id)
        .bind(ticket.seat_configuration_id)
        .bind(ticket.purchase_id)
        .bind(ticket.seat_number)
        .bind(ticket.final_price)
        .bind(TicketStatus::PendingPayment)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::from_ticket_insert(e, ticket.seat_number))
    }

    /// Boletos de una compra junto al documento de su pasajero
    pub async fn list_for_purchase(
        conn: &mut PgConnection,
        purchase_id: Uuid,
    ) -> Result<Vec<TicketWithTrip>, AppError> {
        let sql = format!("{} WHERE t.purchase_id = $1 ORDER BY t.seat_number ASC", TRIP_SELECT);
        let tickets = sqlx::query_as::<_, TicketWithTrip>(&sql)
            .bind(purchase_id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(tickets)
    }

    pub async fn confirm(
        conn: &mut PgConnection,
        id: Uuid,
        qr_code: TicketQrPayload,
    ) -> Result<Ticket, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET status = $2, qr_code = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(TicketStatus::Confirmed)
        .bind(Json(qr_code))
        .fetch_one(&mut *conn)
        .await?;

        Ok(ticket)
    }

    /// Boletos de las compras del comprador, más recientes primero
    pub async fn list_for_buyer(
        conn: &mut PgConnection,
        buyer_id: Uuid,
        filter: &TicketFilter,
    ) -> Result<Vec<TicketWithTrip>, AppError> {
        let sql = format!(
            r#"{}
            WHERE pu.buyer_id = $1
              AND ($2::ticket_status IS NULL OR t.status = $2)
              AND ($3::date IS NULL OR pu.created_at::date >= $3)
              AND ($4::date IS NULL OR pu.created_at::date <= $4)
            ORDER BY pu.created_at DESC, t.seat_number ASC
            "#,
            TRIP_SELECT
        );

        let tickets = sqlx::query_as::<_, TicketWithTrip>(&sql)
            .bind(buyer_id)
            .bind(filter.status)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(&mut *conn)
            .await?;

        Ok(tickets)
    }

    /// Boletos de las rutas de la empresa; fechas sobre el día de compra, salidas más recientes primero
    pub async fn list_sold_for_company(
        conn: &mut PgConnection,
        company_id: Uuid,
        filter: &SoldTicketFilter,
    ) -> Result<Vec<TicketWithTrip>, AppError> {
        let sql = format!(
            r#"{}
            WHERE c.id = $1
              AND ($2::uuid IS NULL OR s.route_id = $2)
              AND ($3::uuid IS NULL OR t.schedule_id = $3)
              AND ($4::date IS NULL OR pu.created_at::date >= $4)
              AND ($5::date IS NULL OR pu.created_at::date <= $5)
            ORDER BY s.departure_date DESC, s.departure_time DESC, t.seat_number ASC
            "#,
            TRIP_SELECT
        );

        let tickets = sqlx::query_as::<_, TicketWithTrip>(&sql)
            .bind(company_id)
            .bind(filter.route_id)
            .bind(filter.schedule_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(&mut *conn)
            .await?;

        Ok(tickets)
    }

    pub async fn find_with_trip(conn: &mut PgConnection, id: Uuid) -> Result<Option<TicketWithTrip>, AppError> {
        let sql = format!("{} WHERE t.id = $1", TRIP_SELECT);
        let ticket = sqlx::query_as::<_, TicketWithTrip>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(ticket)
    }
}
