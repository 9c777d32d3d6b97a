use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::pricing_policy::{PricingPolicy, RouteOverrides};
use crate::repositories::pricing_policy_repository::PolicyValues;

// Request para crear o reemplazar la política de precios de una empresa
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertPolicyRequest {
    pub enabled: bool,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub route_overrides: RouteOverrides,
}

impl From<UpsertPolicyRequest> for PolicyValues {
    fn from(request: UpsertPolicyRequest) -> Self {
        Self {
            enabled: request.enabled,
            min_price: request.min_price,
            max_price: request.max_price,
            route_overrides: request.route_overrides,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub message: String,
    pub policy: PricingPolicy,
}
