//! Orquestador de compras
//!
//! Inicia compras (reserva de asiento en PENDING_PAYMENT) y confirma pagos
//! (PAID + boletos CONFIRMED + registro de uso de terminal). Cada operación
//! corre en una sola transacción; cualquier `?` antes del commit la descarta.

use chrono::{Local, NaiveDateTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::TicketingConfig;
use crate::dto::purchase_dto::{CreatePurchaseRequest, PaidPurchase};
use crate::models::auth::AuthenticatedUser;
use crate::models::passenger::NewPassenger;
use crate::models::purchase::{Purchase, PurchaseStatus};
use crate::models::schedule::Schedule;
use crate::models::ticket::{Ticket, TicketQrPayload};
use crate::repositories::ticket_repository::NewTicket;
use crate::repositories::{
    PassengerRepository, PricingPolicyRepository, PurchaseRepository, ScheduleRepository,
    TerminalUseRepository, TicketRepository,
};
use crate::services::fare_resolver::resolve_selling_price;
use crate::services::seat_availability::lock_available_seat;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Compra iniciada con su único boleto
#[derive(Debug)]
pub struct InitiatedPurchase {
    pub purchase: Purchase,
    pub ticket: Ticket,
}

/// La salida debe ser estrictamente posterior a `now`
pub fn ensure_not_departed(schedule: &Schedule, now: NaiveDateTime) -> Result<(), AppError> {
    if schedule.departure_at() <= now {
        return Err(AppError::Departed(format!(
            "El horario ya partió ({} {}).",
            schedule.departure_date, schedule.departure_time
        )));
    }
    Ok(())
}

/// Solo una compra PENDING_PAYMENT puede pagarse
pub fn ensure_payable(purchase: &Purchase) -> Result<(), AppError> {
    if purchase.status != PurchaseStatus::PendingPayment {
        return Err(AppError::InvalidState(format!(
            "La compra no está pendiente de pago (estado actual: {}).",
            purchase.status.as_str()
        )));
    }
    Ok(())
}

pub fn build_qr_payload(ticket: &Ticket, passenger_document: &str) -> TicketQrPayload {
    TicketQrPayload {
        ticket_id: ticket.id,
        schedule_id: ticket.schedule_id,
        seat_number: ticket.seat_number,
        passenger_document: passenger_document.to_string(),
    }
}

pub struct PurchaseService {
    pool: PgPool,
    config: TicketingConfig,
}

impl PurchaseService {
    pub fn new(pool: PgPool, config: TicketingConfig) -> Self {
        Self { pool, config }
    }

    pub async fn initiate_purchase(
        &self,
        buyer: &AuthenticatedUser,
        request: CreatePurchaseRequest,
    ) -> AppResult<InitiatedPurchase> {
        let mut tx = self.pool.begin().await?;

        let detail = ScheduleRepository::find_detail_for_share(&mut *tx, request.schedule_id)
            .await?
            .ok_or_else(|| not_found_error("Schedule", &request.schedule_id.to_string()))?;

        if let Some(resource) = detail.first_inactive() {
            log::warn!("⚠️ Compra rechazada: {} inactivo en horario {}", resource, detail.schedule.id);
            return Err(AppError::InactiveResource(format!(
                "El horario no está disponible para la venta ({}: inactivo).",
                resource
            )));
        }

        ensure_not_departed(&detail.schedule, Local::now().naive_local())?;

        let seat = lock_available_seat(
            &mut *tx,
            detail.schedule.id,
            detail.schedule.bus_id,
            request.seat_number,
        )
        .await?;

        // La política se relee en cada compra; nunca se cachea
        let policy = PricingPolicyRepository::find_by_company(&mut *tx, detail.company_id).await?;
        let price = resolve_selling_price(&detail.schedule, policy.as_ref());

        let passenger_data: NewPassenger = request.passenger.into();
        let passenger = PassengerRepository::find_or_create(&mut *tx, &passenger_data).await?;

        let purchase = PurchaseRepository::create(&mut *tx, buyer.id, price).await?;
        let ticket = TicketRepository::create(
            &mut *tx,
            &NewTicket {
                passenger_id: passenger.id,
                schedule_id: detail.schedule.id,
                seat_configuration_id: seat.id,
                purchase_id: purchase.id,
                seat_number: seat.seat_number,
                final_price: price,
            },
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "🎫 Compra {} iniciada: horario {}, asiento {}, precio {}",
            purchase.id,
            ticket.schedule_id,
            ticket.seat_number,
            ticket.final_price
        );

        Ok(InitiatedPurchase { purchase, ticket })
    }

    pub async fn confirm_payment(
        &self,
        buyer: &AuthenticatedUser,
        purchase_id: Uuid,
        payment_method: Option<String>,
    ) -> AppResult<PaidPurchase> {
        let mut tx = self.pool.begin().await?;

        let purchase = PurchaseRepository::lock_for_buyer(&mut *tx, purchase_id, buyer.id)
            .await?
            .ok_or_else(|| not_found_error("Purchase", &purchase_id.to_string()))?;

        ensure_payable(&purchase)?;

        let pending = TicketRepository::list_for_purchase(&mut *tx, purchase.id).await?;
        if pending.is_empty() {
            log::error!("❌ Compra {} sin boletos asociados", purchase.id);
            return Err(AppError::NotFound(format!(
                "La compra {} no tiene boletos asociados.",
                purchase.id
            )));
        }

        let method = payment_method
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.config.default_payment_method.clone());

        let purchase = PurchaseRepository::mark_paid(&mut *tx, purchase.id, &method).await?;

        let mut tickets = Vec::with_capacity(pending.len());
        let mut terminal_uses = Vec::with_capacity(pending.len());
        for item in pending {
            let qr_code = build_qr_payload(&item.ticket, &item.document_number);
            let ticket = TicketRepository::confirm(&mut *tx, item.ticket.id, qr_code).await?;
            let terminal_use =
                TerminalUseRepository::create(&mut *tx, ticket.id, self.config.terminal_use_fee).await?;
            tickets.push(ticket);
            terminal_uses.push(terminal_use);
        }

        tx.commit().await?;

        log::info!(
            "💳 Compra {} pagada con {} ({} boleto(s) confirmado(s))",
            purchase.id,
            method,
            tickets.len()
        );

        Ok(PaidPurchase { purchase, tickets, terminal_uses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::fixtures::schedule;
    use crate::models::ticket::TicketStatus;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn purchase(status: PurchaseStatus) -> Purchase {
        Purchase {
            id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            created_at: Utc::now(),
            total_amount: Decimal::from(48000),
            status,
            payment_method: None,
            paid_at: None,
        }
    }

    #[test]
    fn test_departure_must_be_strictly_future() {
        let schedule = schedule(50000, None, false);
        let departure = schedule.departure_at();

        assert!(ensure_not_departed(&schedule, departure - Duration::minutes(1)).is_ok());
        assert!(matches!(
            ensure_not_departed(&schedule, departure),
            Err(AppError::Departed(_))
        ));
        assert!(matches!(
            ensure_not_departed(&schedule, departure + Duration::hours(3)),
            Err(AppError::Departed(_))
        ));
    }

    #[test]
    fn test_only_pending_purchases_are_payable() {
        assert!(ensure_payable(&purchase(PurchaseStatus::PendingPayment)).is_ok());

        let error = ensure_payable(&purchase(PurchaseStatus::Paid)).unwrap_err();
        assert!(matches!(error, AppError::InvalidState(_)));
        assert!(error.to_string().contains("PAID"));
    }

    #[test]
    fn test_qr_payload_carries_ticket_and_document() {
        let ticket = Ticket {
            id: Uuid::new_v4(),
            passenger_id: Uuid::new_v4(),
            schedule_id: Uuid::new_v4(),
            seat_configuration_id: Uuid::new_v4(),
            purchase_id: Uuid::new_v4(),
            seat_number: 12,
            final_price: Decimal::from(48000),
            status: TicketStatus::PendingPayment,
            qr_code: None,
            created_at: Utc::now(),
        };

        let payload = build_qr_payload(&ticket, "1020304050");
        assert_eq!(payload.ticket_id, ticket.id);
        assert_eq!(payload.schedule_id, ticket.schedule_id);
        assert_eq!(payload.seat_number, 12);
        assert_eq!(payload.passenger_document, "1020304050");
    }
}
