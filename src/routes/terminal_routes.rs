use axum::{extract::State, middleware::from_fn_with_state, routing::post, Json, Router};

use crate::dto::terminal_dto::{TerminalUseValidatedResponse, ValidateTerminalUseRequest};
use crate::middleware::{auth_middleware, require_roles};
use crate::models::auth::Role;
use crate::services::TerminalService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

const ACCESS_ROLES: &[Role] = &[Role::SupervisorAcceso, Role::AdministradorTerminal];

pub fn create_terminal_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/validate", post(validate_terminal_use))
        .route_layer(from_fn_with_state(ACCESS_ROLES, require_roles))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn validate_terminal_use(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ValidateTerminalUseRequest>,
) -> Result<Json<TerminalUseValidatedResponse>, AppError> {
    let terminal_use = TerminalService::new(state.pool.clone())
        .validate_terminal_use(request.ticket_id)
        .await?;

    Ok(Json(TerminalUseValidatedResponse {
        message: "Uso de terminal validado.".to_string(),
        terminal_use,
    }))
}
