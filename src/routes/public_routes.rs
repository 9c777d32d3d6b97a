use axum::{extract::State, routing::get, Json, Router};
use uuid::Uuid;

use crate::dto::schedule_dto::{ScheduleSearchResult, SearchQuery, SeatMapResponse};
use crate::services::ScheduleSearchService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedPath, ValidatedQuery};

pub fn create_public_router() -> Router<AppState> {
    Router::new()
        .route("/schedules/search", get(search_schedules))
        .route("/schedules/:id/seats", get(seat_map))
}

async fn search_schedules(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> Result<Json<Vec<ScheduleSearchResult>>, AppError> {
    let results = ScheduleSearchService::new(state.pool.clone()).search(query).await?;
    Ok(Json(results))
}

async fn seat_map(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let seat_map = ScheduleSearchService::new(state.pool.clone()).seat_map(id).await?;
    Ok(Json(seat_map))
}
