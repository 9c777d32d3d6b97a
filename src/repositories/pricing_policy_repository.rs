use rust_decimal::Decimal;
use sqlx::{types::Json, PgConnection};
use uuid::Uuid;

use crate::models::pricing_policy::{PricingPolicy, RouteOverrides};
use crate::utils::errors::AppError;

/// Valores a guardar para la política de una empresa
#[derive(Debug, Clone)]
pub struct PolicyValues {
    pub enabled: bool,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub route_overrides: RouteOverrides,
}

pub struct PricingPolicyRepository;

impl PricingPolicyRepository {
    pub async fn find_by_company(conn: &mut PgConnection, company_id: Uuid) -> Result<Option<PricingPolicy>, AppError> {
        let policy = sqlx::query_as::<_, PricingPolicy>(
            "SELECT * FROM pricing_policies WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(policy)
    }

    /// Crea o reemplaza la política (una por empresa)
    pub async fn upsert(
        conn: &mut PgConnection,
        company_id: Uuid,
        values: PolicyValues,
    ) -> Result<PricingPolicy, AppError> {
        let policy = sqlx::query_as::<_, PricingPolicy>(
            r#"
            INSERT INTO pricing_policies (id, company_id, enabled, min_price, max_price, route_overrides, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (company_id) DO UPDATE
            SET enabled = EXCLUDED.enabled,
                min_price = EXCLUDED.min_price,
                max_price = EXCLUDED.max_price,
                route_overrides = EXCLUDED.route_overrides,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(values.enabled)
        .bind(values.min_price)
        .bind(values.max_price)
        .bind(Json(values.route_overrides))
        .fetch_one(&mut *conn)
        .await?;

        Ok(policy)
    }
}
