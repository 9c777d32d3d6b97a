//! Consultas de boletos: listado del cliente, boleto digital y boletos
//! vendidos por una empresa

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::ticket_dto::{MyTicketsQuery, SoldTicketsQuery};
use crate::models::auth::AuthenticatedUser;
use crate::models::ticket::{TicketStatus, TicketWithTrip};
use crate::repositories::ticket_repository::{SoldTicketFilter, TicketFilter};
use crate::repositories::TicketRepository;
use crate::services::authorization_service::own_company;
use crate::utils::errors::{forbidden_error, not_found_error, AppError, AppResult};
use crate::utils::validation::parse_date_range;

pub fn parse_filter(query: &MyTicketsQuery) -> Result<TicketFilter, AppError> {
    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(TicketStatus::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Estado de boleto desconocido: '{}'.", raw))
        })?),
        None => None,
    };
    let (from, to) = parse_date_range(query.from.as_deref(), query.to.as_deref())?;

    Ok(TicketFilter { status, from, to })
}

/// El boleto digital solo existe para su comprador y una vez confirmado
pub fn check_digital_access(owner_id: Uuid, status: TicketStatus, buyer_id: Uuid) -> Result<(), AppError> {
    if owner_id != buyer_id {
        return Err(forbidden_error("ver el boleto", "pertenece a otro comprador"));
    }
    if status != TicketStatus::Confirmed {
        return Err(AppError::InvalidState(format!(
            "El boleto no está confirmado (estado actual: {}).",
            status.as_str()
        )));
    }
    Ok(())
}

pub struct TicketService {
    pool: PgPool,
}

impl TicketService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn my_tickets(&self, buyer: &AuthenticatedUser, query: &MyTicketsQuery) -> AppResult<Vec<TicketWithTrip>> {
        let filter = parse_filter(query)?;
        let mut conn = self.pool.acquire().await?;
        TicketRepository::list_for_buyer(&mut *conn, buyer.id, &filter).await
    }

    /// Boletos vendidos en las rutas de la empresa del administrador
    pub async fn company_sold_tickets(
        &self,
        actor: &AuthenticatedUser,
        query: &SoldTicketsQuery,
    ) -> AppResult<(Uuid, Vec<TicketWithTrip>)> {
        let company_id = own_company(actor, "listar boletos vendidos")?;
        let (from, to) = parse_date_range(query.from.as_deref(), query.to.as_deref())?;
        let filter = SoldTicketFilter {
            route_id: query.route_id,
            schedule_id: query.schedule_id,
            from,
            to,
        };

        let mut conn = self.pool.acquire().await?;
        let tickets = TicketRepository::list_sold_for_company(&mut *conn, company_id, &filter).await?;
        Ok((company_id, tickets))
    }

    pub async fn digital_ticket(&self, buyer: &AuthenticatedUser, ticket_id: Uuid) -> AppResult<TicketWithTrip> {
        let mut conn = self.pool.acquire().await?;
        let ticket = TicketRepository::find_with_trip(&mut *conn, ticket_id)
            .await?
            .ok_or_else(|| not_found_error("Ticket", &ticket_id.to_string()))?;

        check_digital_access(ticket.buyer_id, ticket.ticket.status, buyer.id)?;
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        let query = MyTicketsQuery {
            status: Some("confirmed".to_string()),
            from: Some("2026-01-01".to_string()),
            to: Some("2026-01-31".to_string()),
        };
        let filter = parse_filter(&query).unwrap();
        assert_eq!(filter.status, Some(TicketStatus::Confirmed));
        assert!(filter.from.is_some() && filter.to.is_some());

        assert!(parse_filter(&MyTicketsQuery::default()).unwrap().status.is_none());
    }

    #[test]
    fn test_parse_filter_rejects_bad_input() {
        let unknown = MyTicketsQuery { status: Some("VENDIDO".to_string()), ..Default::default() };
        assert!(matches!(parse_filter(&unknown), Err(AppError::Validation(_))));

        let inverted = MyTicketsQuery {
            from: Some("2026-02-01".to_string()),
            to: Some("2026-01-01".to_string()),
            ..Default::default()
        };
        assert!(parse_filter(&inverted).is_err());
    }

    #[test]
    fn test_digital_ticket_access() {
        let buyer = Uuid::new_v4();
        assert!(check_digital_access(buyer, TicketStatus::Confirmed, buyer).is_ok());
        assert!(matches!(
            check_digital_access(Uuid::new_v4(), TicketStatus::Confirmed, buyer),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            check_digital_access(buyer, TicketStatus::PendingPayment, buyer),
            Err(AppError::InvalidState(_))
        ));
    }
}
