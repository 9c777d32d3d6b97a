//! Modelo de PricingPolicy
//!
//! Política de precios de una empresa: habilita o no el precio sugerido por IA
//! y acota los ajustes manuales. Cada ruta puede sobrescribir parcialmente la
//! política global; los campos ausentes en la ruta heredan el valor global.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Sobrescritura parcial de la política para una ruta
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
}

pub type RouteOverrides = HashMap<Uuid, RouteOverride>;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PricingPolicy {
    pub id: Uuid,
    pub company_id: Uuid,
    pub enabled: bool,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub route_overrides: Json<RouteOverrides>,
    pub updated_at: DateTime<Utc>,
}

/// Rango permitido para un precio; `None` significa sin límite por ese lado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceBounds {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceBounds {
    pub fn contains(&self, price: Decimal) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }

    /// Ambos extremos positivos y min <= max
    pub fn is_consistent(&self) -> bool {
        let positive = |v: Option<Decimal>| v.map_or(true, |v| v > Decimal::ZERO);
        let ordered = match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        };
        positive(self.min) && positive(self.max) && ordered
    }
}

impl fmt::Display for PriceBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = self.min.unwrap_or(Decimal::ZERO);
        match self.max {
            Some(max) => write!(f, "{} - {}", min, max),
            None => write!(f, "{} - sin límite", min),
        }
    }
}

impl PricingPolicy {
    pub fn route_override(&self, route_id: Uuid) -> Option<&RouteOverride> {
        self.route_overrides.0.get(&route_id)
    }

    /// La IA aplica si la política está habilitada y la ruta no la deshabilita explícitamente
    pub fn ai_enabled_for(&self, route_id: Uuid) -> bool {
        self.enabled
            && self
                .route_override(route_id)
                .and_then(|o| o.enabled)
                != Some(false)
    }

    /// Límites globales, sustituidos campo a campo por los de la ruta si existen
    pub fn bounds_for(&self, route_id: Uuid) -> PriceBounds {
        let route = self.route_override(route_id);
        PriceBounds {
            min: route.and_then(|o| o.min_price).or(self.min_price),
            max: route.and_then(|o| o.max_price).or(self.max_price),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn policy(enabled: bool, min: Option<i64>, max: Option<i64>) -> PricingPolicy {
        PricingPolicy {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            enabled,
            min_price: min.map(Decimal::from),
            max_price: max.map(Decimal::from),
            route_overrides: Json(HashMap::new()),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::policy;
    use super::*;

    #[test]
    fn test_bounds_merge_route_over_global() {
        let route_id = Uuid::new_v4();
        let mut policy = policy(true, Some(40000), Some(55000));
        policy.route_overrides.0.insert(
            route_id,
            RouteOverride {
                enabled: None,
                min_price: None,
                max_price: Some(Decimal::from(70000)),
            },
        );

        let bounds = policy.bounds_for(route_id);
        assert_eq!(bounds.min, Some(Decimal::from(40000)));
        assert_eq!(bounds.max, Some(Decimal::from(70000)));

        let other = policy.bounds_for(Uuid::new_v4());
        assert_eq!(other.max, Some(Decimal::from(55000)));
    }

    #[test]
    fn test_ai_enabled_only_disabled_by_explicit_false() {
        let route_id = Uuid::new_v4();
        let mut policy = policy(true, None, None);
        assert!(policy.ai_enabled_for(route_id));

        policy.route_overrides.0.insert(route_id, RouteOverride { enabled: Some(true), ..Default::default() });
        assert!(policy.ai_enabled_for(route_id));

        policy.route_overrides.0.insert(route_id, RouteOverride { enabled: Some(false), ..Default::default() });
        assert!(!policy.ai_enabled_for(route_id));

        policy.enabled = false;
        assert!(!policy.ai_enabled_for(Uuid::new_v4()));
    }

    #[test]
    fn test_price_bounds_contains_and_consistency() {
        let bounds = PriceBounds { min: Some(Decimal::from(40000)), max: Some(Decimal::from(55000)) };
        assert!(bounds.contains(Decimal::from(40000)));
        assert!(bounds.contains(Decimal::from(55000)));
        assert!(!bounds.contains(Decimal::from(60000)));
        assert!(bounds.is_consistent());

        let inverted = PriceBounds { min: Some(Decimal::from(10)), max: Some(Decimal::from(5)) };
        assert!(!inverted.is_consistent());

        let open = PriceBounds::default();
        assert!(open.contains(Decimal::from(1_000_000)));
        assert_eq!(open.to_string(), "0 - sin límite");
    }

    #[test]
    fn test_route_overrides_deserialize_from_json_map() {
        let route_id = Uuid::new_v4();
        let raw = format!(r#"{{"{}": {{"enabled": false, "min_price": 30000}}}}"#, route_id);
        let overrides: RouteOverrides = serde_json::from_str(&raw).unwrap();
        let entry = overrides.get(&route_id).unwrap();
        assert_eq!(entry.enabled, Some(false));
        assert_eq!(entry.min_price, Some(Decimal::from(30000)));
        assert_eq!(entry.max_price, None);
    }
}
