use axum::{extract::State, middleware::from_fn_with_state, routing::get, Json, Router};
use uuid::Uuid;

use crate::dto::ticket_dto::{
    DigitalTicketResponse, MyTicketsQuery, MyTicketsResponse, SoldTicketsQuery, SoldTicketsResponse,
};
use crate::middleware::{auth_middleware, require_roles};
use crate::models::auth::{AuthenticatedUser, Role};
use crate::services::TicketService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedPath, ValidatedQuery};

const BUYER_ROLES: &[Role] = &[Role::Cliente];
const COMPANY_ROLES: &[Role] = &[Role::AdministradorEmpresa];

pub fn create_ticket_router(state: AppState) -> Router<AppState> {
    let buyer_routes = Router::new()
        .route("/mine", get(my_tickets))
        .route("/:id", get(digital_ticket))
        .route_layer(from_fn_with_state(BUYER_ROLES, require_roles));

    let company_routes = Router::new()
        .route("/sold", get(sold_tickets))
        .route_layer(from_fn_with_state(COMPANY_ROLES, require_roles));

    buyer_routes
        .merge(company_routes)
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn my_tickets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<MyTicketsQuery>,
) -> Result<Json<MyTicketsResponse>, AppError> {
    let tickets = TicketService::new(state.pool.clone()).my_tickets(&user, &query).await?;
    Ok(Json(MyTicketsResponse { total: tickets.len(), tickets }))
}

async fn digital_ticket(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<DigitalTicketResponse>, AppError> {
    let ticket = TicketService::new(state.pool.clone()).digital_ticket(&user, id).await?;
    Ok(Json(DigitalTicketResponse { ticket }))
}

async fn sold_tickets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<SoldTicketsQuery>,
) -> Result<Json<SoldTicketsResponse>, AppError> {
    let (company_id, tickets) = TicketService::new(state.pool.clone())
        .company_sold_tickets(&user, &query)
        .await?;
    Ok(Json(SoldTicketsResponse { company_id, total: tickets.len(), tickets }))
}
