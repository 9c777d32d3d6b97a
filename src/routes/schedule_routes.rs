use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::schedule_dto::{
    AdjustPriceRequest, AdjustPriceResponse, CompanySchedulesQuery, CompanySchedulesResponse,
    CreateScheduleRequest, PriceHistoryResponse, ScheduleResponse, UpdateScheduleRequest,
};
use crate::middleware::{auth_middleware, require_roles};
use crate::models::auth::{AuthenticatedUser, Role};
use crate::services::{PricingService, ScheduleAdminService};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedJson, ValidatedPath, ValidatedQuery};

const PRICE_ADMIN_ROLES: &[Role] = &[Role::AdministradorEmpresa, Role::AdministradorTerminal];
const SCHEDULE_ADMIN_ROLES: &[Role] = &[Role::AdministradorEmpresa];

pub fn create_schedule_router(state: AppState) -> Router<AppState> {
    let schedule_admin = Router::new()
        .route("/", post(create_schedule).get(list_company_schedules))
        .route("/:id", patch(update_schedule))
        .route("/:id/deactivate", post(deactivate_schedule))
        .route_layer(from_fn_with_state(SCHEDULE_ADMIN_ROLES, require_roles));

    let pricing = Router::new()
        .route("/:id/price", put(adjust_price))
        .route("/:id/price-history", get(price_history))
        .route_layer(from_fn_with_state(PRICE_ADMIN_ROLES, require_roles));

    schedule_admin
        .merge(pricing)
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_schedule(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), AppError> {
    let schedule = ScheduleAdminService::new(state.pool.clone())
        .create_schedule(&user, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ScheduleResponse {
            message: "Horario creado.".to_string(),
            schedule,
        }),
    ))
}

async fn list_company_schedules(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<CompanySchedulesQuery>,
) -> Result<Json<CompanySchedulesResponse>, AppError> {
    let schedules = ScheduleAdminService::new(state.pool.clone())
        .list_company_schedules(&user, &query)
        .await?;
    Ok(Json(CompanySchedulesResponse { total: schedules.len(), schedules }))
}

async fn update_schedule(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let schedule = ScheduleAdminService::new(state.pool.clone())
        .update_schedule(&user, id, request)
        .await?;

    Ok(Json(ScheduleResponse {
        message: "Horario actualizado.".to_string(),
        schedule,
    }))
}

async fn deactivate_schedule(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let schedule = ScheduleAdminService::new(state.pool.clone())
        .deactivate_schedule(&user, id)
        .await?;

    Ok(Json(ScheduleResponse {
        message: "Horario desactivado.".to_string(),
        schedule,
    }))
}

async fn adjust_price(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<AdjustPriceRequest>,
) -> Result<Json<AdjustPriceResponse>, AppError> {
    let adjusted = PricingService::new(state.pool.clone())
        .adjust_price(&user, id, request.new_final_price)
        .await?;

    Ok(Json(AdjustPriceResponse {
        message: "Precio ajustado correctamente.".to_string(),
        schedule: adjusted.schedule,
        adjustment: adjusted.adjustment,
    }))
}

async fn price_history(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<PriceHistoryResponse>, AppError> {
    let adjustments = PricingService::new(state.pool.clone()).price_history(&user, id).await?;
    Ok(Json(PriceHistoryResponse {
        schedule_id: id,
        total: adjustments.len(),
        adjustments,
    }))
}
