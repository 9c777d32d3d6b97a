//! Administración de precios
//!
//! Ajuste manual del precio de un horario, historial de ajustes y política de
//! precios por empresa.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::pricing_policy_dto::UpsertPolicyRequest;
use crate::models::auth::AuthenticatedUser;
use crate::models::price_adjustment::PriceAdjustment;
use crate::models::pricing_policy::{PriceBounds, PricingPolicy};
use crate::models::schedule::Schedule;
use crate::repositories::{
    CompanyRepository, PriceAdjustmentRepository, PricingPolicyRepository, ScheduleRepository,
};
use crate::services::authorization_service::company_scope;
use crate::services::fare_resolver::check_adjusted_price;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::max_storable_price;

/// Límites globales y de cada ruta (ya combinados) deben ser coherentes
pub fn check_policy_bounds(request: &UpsertPolicyRequest) -> Result<(), AppError> {
    let fits = |v: &Option<Decimal>| v.map_or(true, |v| v <= max_storable_price());
    let every_bound = [&request.min_price, &request.max_price].into_iter().chain(
        request
            .route_overrides
            .values()
            .flat_map(|route| [&route.min_price, &route.max_price]),
    );
    for bound in every_bound {
        if !fits(bound) {
            return Err(AppError::InvalidPrice(format!(
                "Los límites de precio no pueden superar {}.",
                max_storable_price()
            )));
        }
    }

    let global = PriceBounds { min: request.min_price, max: request.max_price };
    if !global.is_consistent() {
        return Err(AppError::InvalidPrice(format!(
            "Límites de precio inválidos ({}): deben ser positivos y el mínimo no puede superar al máximo.",
            global
        )));
    }

    for (route_id, route) in &request.route_overrides {
        let merged = PriceBounds {
            min: route.min_price.or(request.min_price),
            max: route.max_price.or(request.max_price),
        };
        if !merged.is_consistent() {
            return Err(AppError::InvalidPrice(format!(
                "Límites de precio inválidos para la ruta {} ({}).",
                route_id, merged
            )));
        }
    }

    Ok(())
}

/// Resultado de un ajuste manual
#[derive(Debug)]
pub struct AdjustedPrice {
    pub schedule: Schedule,
    pub adjustment: PriceAdjustment,
}

pub struct PricingService {
    pool: PgPool,
}

impl PricingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn adjust_price(
        &self,
        actor: &AuthenticatedUser,
        schedule_id: Uuid,
        new_price: Decimal,
    ) -> AppResult<AdjustedPrice> {
        let mut tx = self.pool.begin().await?;

        let detail = ScheduleRepository::lock_detail_for_update(&mut *tx, schedule_id)
            .await?
            .ok_or_else(|| not_found_error("Schedule", &schedule_id.to_string()))?;

        let adjustment_type = company_scope(actor, detail.company_id, "ajustar el precio")?;

        let policy = PricingPolicyRepository::find_by_company(&mut *tx, detail.company_id).await?;
        let new_price = match check_adjusted_price(new_price, &detail.schedule, policy.as_ref()) {
            Ok(price) => price,
            Err(error) => {
                log::warn!("⚠️ Ajuste de precio rechazado en horario {}: {}", schedule_id, error);
                return Err(error);
            }
        };

        let schedule = ScheduleRepository::set_manual_price(&mut *tx, schedule_id, new_price).await?;
        let adjustment = PriceAdjustmentRepository::append(
            &mut *tx,
            schedule_id,
            detail.schedule.ai_suggested_price,
            new_price,
            adjustment_type,
            actor.id,
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "💲 Precio del horario {} ajustado: {} → {} por {}",
            schedule_id,
            detail.schedule.base_price,
            new_price,
            actor.id
        );

        Ok(AdjustedPrice { schedule, adjustment })
    }

    pub async fn price_history(
        &self,
        actor: &AuthenticatedUser,
        schedule_id: Uuid,
    ) -> AppResult<Vec<PriceAdjustment>> {
        let mut conn = self.pool.acquire().await?;

        let detail = ScheduleRepository::find_detail(&mut *conn, schedule_id)
            .await?
            .ok_or_else(|| not_found_error("Schedule", &schedule_id.to_string()))?;
        company_scope(actor, detail.company_id, "consultar el historial de precios")?;

        PriceAdjustmentRepository::list_for_schedule(&mut *conn, schedule_id).await
    }

    pub async fn get_policy(&self, actor: &AuthenticatedUser, company_id: Uuid) -> AppResult<PricingPolicy> {
        company_scope(actor, company_id, "consultar la política de precios")?;

        let mut conn = self.pool.acquire().await?;
        PricingPolicyRepository::find_by_company(&mut *conn, company_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("La empresa {} no tiene política de precios.", company_id))
            })
    }

    /// Crea o reemplaza la política; devuelve `true` si se creó
    pub async fn upsert_policy(
        &self,
        company_id: Uuid,
        request: UpsertPolicyRequest,
    ) -> AppResult<(PricingPolicy, bool)> {
        check_policy_bounds(&request)?;

        let mut tx = self.pool.begin().await?;

        CompanyRepository::find_by_id(&mut *tx, company_id)
            .await?
            .ok_or_else(|| not_found_error("Company", &company_id.to_string()))?;

        let created = PricingPolicyRepository::find_by_company(&mut *tx, company_id)
            .await?
            .is_none();
        let policy = PricingPolicyRepository::upsert(&mut *tx, company_id, request.into()).await?;

        tx.commit().await?;

        log::info!(
            "📋 Política de precios de la empresa {} {} (IA: {})",
            company_id,
            if created { "creada" } else { "actualizada" },
            policy.enabled
        );

        Ok((policy, created))
    }
}
