//! Resolución del precio de venta
//!
//! Prioridad: precio manual > precio sugerido por IA (si la política de la
//! empresa lo habilita para la ruta) > precio base. Funciones puras, sin I/O.

use rust_decimal::Decimal;

use crate::models::pricing_policy::{PriceBounds, PricingPolicy};
use crate::models::schedule::Schedule;
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_price;

/// Precio vendible del horario. Sin política se trata como deshabilitada.
pub fn resolve_selling_price(schedule: &Schedule, policy: Option<&PricingPolicy>) -> Decimal {
    let price = if schedule.manually_overridden {
        schedule.base_price
    } else {
        match (policy, schedule.ai_suggested_price) {
            (Some(policy), Some(ai_price)) if policy.ai_enabled_for(schedule.route_id) => ai_price,
            _ => schedule.base_price,
        }
    };

    price.round_dp(2)
}

/// Límites que aplican a un ajuste manual; solo con política habilitada
pub fn adjustment_bounds(schedule: &Schedule, policy: Option<&PricingPolicy>) -> Option<PriceBounds> {
    policy
        .filter(|policy| policy.enabled)
        .map(|policy| policy.bounds_for(schedule.route_id))
}

/// Valida un precio manual y devuelve el monto que se guardará: redondeado a
/// centavos, positivo, dentro de la columna y, si hay límites, dentro de ellos
pub fn check_adjusted_price(
    new_price: Decimal,
    schedule: &Schedule,
    policy: Option<&PricingPolicy>,
) -> Result<Decimal, AppError> {
    let price = normalize_price(new_price, "nuevo precio")?;

    if let Some(bounds) = adjustment_bounds(schedule, policy) {
        if !bounds.contains(price) {
            return Err(AppError::InvalidPrice(format!(
                "El precio {} está fuera del rango permitido ({}).",
                price, bounds
            )));
        }
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pricing_policy::fixtures::policy;
    use crate::models::pricing_policy::RouteOverride;
    use crate::models::schedule::fixtures::schedule;

    #[test]
    fn test_ai_price_when_policy_enabled() {
        let schedule = schedule(50000, Some(45000), false);
        let policy = policy(true, None, None);
        assert_eq!(resolve_selling_price(&schedule, Some(&policy)), Decimal::from(45000));
    }

    #[test]
    fn test_manual_override_always_wins() {
        let schedule = schedule(48000, Some(45000), true);
        let policy = policy(true, None, None);
        assert_eq!(resolve_selling_price(&schedule, Some(&policy)), Decimal::from(48000));
        assert_eq!(resolve_selling_price(&schedule, None), Decimal::from(48000));
    }

    #[test]
    fn test_base_price_without_policy_or_ai() {
        let with_ai = schedule(50000, Some(45000), false);
        assert_eq!(resolve_selling_price(&with_ai, None), Decimal::from(50000));

        let disabled = policy(false, None, None);
        assert_eq!(resolve_selling_price(&with_ai, Some(&disabled)), Decimal::from(50000));

        let without_ai = schedule(50000, None, false);
        let enabled = policy(true, None, None);
        assert_eq!(resolve_selling_price(&without_ai, Some(&enabled)), Decimal::from(50000));
    }

    #[test]
    fn test_route_override_disables_ai() {
        let schedule = schedule(50000, Some(45000), false);
        let mut policy = policy(true, None, None);
        policy.route_overrides.0.insert(
            schedule.route_id,
            RouteOverride { enabled: Some(false), ..Default::default() },
        );
        assert_eq!(resolve_selling_price(&schedule, Some(&policy)), Decimal::from(50000));
    }

    #[test]
    fn test_resolution_is_deterministic_and_rounded() {
        let mut schedule = schedule(50000, None, false);
        schedule.base_price = Decimal::new(4999999, 3);
        let first = resolve_selling_price(&schedule, None);
        let second = resolve_selling_price(&schedule, None);
        assert_eq!(first, second);
        assert_eq!(first, Decimal::new(500000, 2));
    }

    #[test]
    fn test_adjusted_price_respects_bounds() {
        let schedule = schedule(50000, Some(45000), false);
        let policy = policy(true, Some(40000), Some(55000));

        let rejected = check_adjusted_price(Decimal::from(60000), &schedule, Some(&policy));
        assert!(matches!(rejected, Err(AppError::InvalidPrice(_))));

        assert!(check_adjusted_price(Decimal::from(48000), &schedule, Some(&policy)).is_ok());
    }

    #[test]
    fn test_adjusted_price_any_positive_when_disabled() {
        let schedule = schedule(50000, None, false);
        let policy = policy(false, Some(40000), Some(55000));
        assert!(check_adjusted_price(Decimal::from(90000), &schedule, Some(&policy)).is_ok());
        assert!(check_adjusted_price(Decimal::from(1), &schedule, None).is_ok());

        let zero = check_adjusted_price(Decimal::ZERO, &schedule, None);
        assert!(matches!(zero, Err(AppError::InvalidPrice(_))));
        let negative = check_adjusted_price(Decimal::from(-5), &schedule, Some(&policy));
        assert!(matches!(negative, Err(AppError::InvalidPrice(_))));
    }

    #[test]
    fn test_route_bounds_override_global() {
        let schedule = schedule(50000, None, false);
        let mut policy = policy(true, Some(40000), Some(55000));
        policy.route_overrides.0.insert(
            schedule.route_id,
            RouteOverride { max_price: Some(Decimal::from(70000)), ..Default::default() },
        );
        assert!(check_adjusted_price(Decimal::from(65000), &schedule, Some(&policy)).is_ok());
        assert!(check_adjusted_price(Decimal::from(39000), &schedule, Some(&policy)).is_err());
    }

    #[test]
    fn test_adjusted_price_checked_after_rounding() {
        let schedule = schedule(50000, None, false);
        let policy = policy(true, Some(40000), Some(55000));

        let at_max = check_adjusted_price(Decimal::new(55000004, 3), &schedule, Some(&policy)).unwrap();
        assert_eq!(at_max, Decimal::from(55000));

        let stored = check_adjusted_price(Decimal::new(4800000999, 5), &schedule, None).unwrap();
        assert_eq!(stored, Decimal::new(4800001, 2));
    }

    #[test]
    fn test_adjusted_price_beyond_column_capacity_is_invalid() {
        let schedule = schedule(50000, None, false);
        let disabled = policy(false, None, None);
        let huge = check_adjusted_price(Decimal::from(10_000_000_000_i64), &schedule, Some(&disabled));
        assert!(matches!(huge, Err(AppError::InvalidPrice(_))));
    }
}
