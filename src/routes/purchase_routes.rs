use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::post,
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::purchase_dto::{
    CreatePurchaseRequest, PayPurchaseRequest, PurchaseCreatedResponse, PurchasePaidResponse,
};
use crate::middleware::{auth_middleware, require_roles};
use crate::models::auth::{AuthenticatedUser, Role};
use crate::services::PurchaseService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedJson, ValidatedPath};

const BUYER_ROLES: &[Role] = &[Role::Cliente];

pub fn create_purchase_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_purchase))
        .route("/:id/pay", post(pay_purchase))
        .route_layer(from_fn_with_state(BUYER_ROLES, require_roles))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_purchase(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreatePurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseCreatedResponse>), AppError> {
    let service = PurchaseService::new(state.pool.clone(), state.config.ticketing.clone());
    let initiated = service.initiate_purchase(&user, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseCreatedResponse {
            message: "Compra iniciada. Asiento reservado pendiente de pago.".to_string(),
            purchase: initiated.purchase,
            ticket: initiated.ticket,
        }),
    ))
}

// El body es opcional: sin body se usa el medio de pago por defecto
fn parse_pay_request(body: &Bytes) -> Result<PayPurchaseRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PayPurchaseRequest::default());
    }
    let request: PayPurchaseRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Body JSON inválido: {}", e)))?;
    request.validate()?;
    Ok(request)
}

async fn pay_purchase(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    body: Bytes,
) -> Result<Json<PurchasePaidResponse>, AppError> {
    let request = parse_pay_request(&body)?;
    let service = PurchaseService::new(state.pool.clone(), state.config.ticketing.clone());
    let purchase = service.confirm_payment(&user, id, request.payment_method).await?;

    Ok(Json(PurchasePaidResponse {
        message: "Pago confirmado. Boletos emitidos.".to_string(),
        purchase,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pay_body_uses_defaults() {
        let request = parse_pay_request(&Bytes::new()).unwrap();
        assert!(request.payment_method.is_none());
    }

    #[test]
    fn test_pay_body_with_method() {
        let body = Bytes::from_static(br#"{"payment_method": "PSE"}"#);
        assert_eq!(parse_pay_request(&body).unwrap().payment_method.as_deref(), Some("PSE"));
    }

    #[test]
    fn test_malformed_pay_body_is_validation_error() {
        let body = Bytes::from_static(b"{payment");
        assert!(matches!(parse_pay_request(&body), Err(AppError::Validation(_))));
    }
}
