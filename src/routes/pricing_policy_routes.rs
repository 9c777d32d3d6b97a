use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::put,
    Json, Router,
};
use uuid::Uuid;

use crate::dto::pricing_policy_dto::{PolicyResponse, UpsertPolicyRequest};
use crate::middleware::{auth_middleware, require_roles};
use crate::models::auth::{AuthenticatedUser, Role};
use crate::models::pricing_policy::PricingPolicy;
use crate::services::PricingService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedJson, ValidatedPath};

const POLICY_WRITERS: &[Role] = &[Role::AdministradorTerminal];
const POLICY_READERS: &[Role] = &[Role::AdministradorTerminal, Role::AdministradorEmpresa];

pub fn create_pricing_policy_router(state: AppState) -> Router<AppState> {
    // El layer de escritores solo envuelve PUT; GET se agrega después
    let policy_routes = put(upsert_policy)
        .route_layer(from_fn_with_state(POLICY_WRITERS, require_roles))
        .get(get_policy);

    Router::new()
        .route("/:company_id", policy_routes)
        .route_layer(from_fn_with_state(POLICY_READERS, require_roles))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn get_policy(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedPath(company_id): ValidatedPath<Uuid>,
) -> Result<Json<PricingPolicy>, AppError> {
    let policy = PricingService::new(state.pool.clone()).get_policy(&user, company_id).await?;
    Ok(Json(policy))
}

async fn upsert_policy(
    State(state): State<AppState>,
    ValidatedPath(company_id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpsertPolicyRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), AppError> {
    let (policy, created) = PricingService::new(state.pool.clone())
        .upsert_policy(company_id, request)
        .await?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Política de precios creada.")
    } else {
        (StatusCode::OK, "Política de precios actualizada.")
    };

    Ok((status, Json(PolicyResponse { message: message.to_string(), policy })))
}
