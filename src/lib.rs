//! Núcleo de venta de boletos de la terminal de buses
//!
//! Compra de asientos, confirmación de pago, resolución de precios y
//! validación del uso de terminal, expuestos como API REST con axum.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::routes::{
    pricing_policy_routes, public_routes, purchase_routes, schedule_routes, terminal_routes,
    ticket_routes,
};
use crate::state::AppState;

/// Router completo de la API
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/api/health", get(health))
        .nest("/api/purchases", purchase_routes::create_purchase_router(state.clone()))
        .nest("/api/tickets", ticket_routes::create_ticket_router(state.clone()))
        .nest("/api/schedules", schedule_routes::create_schedule_router(state.clone()))
        .nest(
            "/api/admin/pricing-policies",
            pricing_policy_routes::create_pricing_policy_router(state.clone()),
        )
        .nest("/api/terminal", terminal_routes::create_terminal_router(state.clone()))
        .nest("/api/public", public_routes::create_public_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
