use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::price_adjustment::{AdjustmentType, PriceAdjustment};
use crate::utils::errors::AppError;

pub struct PriceAdjustmentRepository;

impl PriceAdjustmentRepository {
    pub async fn append(
        conn: &mut PgConnection,
        schedule_id: Uuid,
        predicted_price: Option<Decimal>,
        final_price: Decimal,
        adjustment_type: AdjustmentType,
        adjusted_by: Uuid,
    ) -> Result<PriceAdjustment, AppError> {
        let adjustment = sqlx::query_as::<_, PriceAdjustment>(
            r#"
            INSERT INTO price_adjustments (id, schedule_id, predicted_price, final_price, adjusted_at, adjustment_type, adjusted_by)
            VALUES ($1, $2, $3, $4, NOW(), $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(schedule_id)
        .bind(predicted_price)
        .bind(final_price)
        .bind(adjustment_type)
        .bind(adjusted_by)
        .fetch_one(&mut *conn)
        .await?;

        Ok(adjustment)
    }

    pub async fn list_for_schedule(conn: &mut PgConnection, schedule_id: Uuid) -> Result<Vec<PriceAdjustment>, AppError> {
        let adjustments = sqlx::query_as::<_, PriceAdjustment>(
            "SELECT * FROM price_adjustments WHERE schedule_id = $1 ORDER BY adjusted_at DESC",
        )
        .bind(schedule_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(adjustments)
    }
}
