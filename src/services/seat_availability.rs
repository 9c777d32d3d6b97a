//! Disponibilidad de asientos
//!
//! Un asiento está disponible si está habilitado en el bus y ningún boleto del
//! horario lo ocupa (PENDING_PAYMENT y CONFIRMED ocupan). La lectura se hace
//! dentro de la transacción de la compra, con el asiento bloqueado.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::seat::SeatConfiguration;
use crate::models::ticket::TicketStatus;
use crate::repositories::SeatRepository;
use crate::utils::errors::AppError;

/// Regla pura de disponibilidad
pub fn is_seat_available(seat: &SeatConfiguration, ticket_statuses: &[TicketStatus]) -> bool {
    seat.enabled_on_bus && !ticket_statuses.iter().any(TicketStatus::occupies_seat)
}

/// Bloquea el asiento y verifica que se pueda vender en el horario.
/// Devuelve la configuración bloqueada para enlazarla al boleto.
pub async fn lock_available_seat(
    conn: &mut PgConnection,
    schedule_id: Uuid,
    bus_id: Uuid,
    seat_number: i32,
) -> Result<SeatConfiguration, AppError> {
    let seat = SeatRepository::lock_seat(conn, bus_id, seat_number)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("El asiento {} no existe en el bus.", seat_number))
        })?;

    if !seat.enabled_on_bus {
        return Err(AppError::SeatDisabled(format!(
            "El asiento {} no está habilitado en el bus.",
            seat_number
        )));
    }

    let statuses = SeatRepository::ticket_statuses(conn, schedule_id, seat_number).await?;
    if !is_seat_available(&seat, &statuses) {
        return Err(AppError::SeatOccupied(format!(
            "El asiento {} ya está ocupado o reservado.",
            seat_number
        )));
    }

    Ok(seat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(enabled_on_bus: bool) -> SeatConfiguration {
        SeatConfiguration {
            id: Uuid::new_v4(),
            bus_id: Uuid::new_v4(),
            seat_number: 12,
            floor: 1,
            seat_type: "STANDARD".to_string(),
            enabled_on_bus,
        }
    }

    #[test]
    fn test_free_enabled_seat_is_available() {
        assert!(is_seat_available(&seat(true), &[]));
    }

    #[test]
    fn test_pending_and_confirmed_tickets_occupy() {
        assert!(!is_seat_available(&seat(true), &[TicketStatus::PendingPayment]));
        assert!(!is_seat_available(&seat(true), &[TicketStatus::Cancelled, TicketStatus::Confirmed]));
    }

    #[test]
    fn test_cancelled_and_annulled_release_the_seat() {
        assert!(is_seat_available(&seat(true), &[TicketStatus::Cancelled, TicketStatus::Annulled]));
    }

    #[test]
    fn test_disabled_seat_is_never_available() {
        assert!(!is_seat_available(&seat(false), &[]));
    }
}
