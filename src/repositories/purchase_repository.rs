use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::purchase::{Purchase, PurchaseStatus};
use crate::utils::errors::AppError;

pub struct PurchaseRepository;

impl PurchaseRepository {
    pub async fn create(conn: &mut PgConnection, buyer_id: Uuid, total_amount: Decimal) -> Result<Purchase, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (id, buyer_id, created_at, total_amount, status)
            VALUES ($1, $2, NOW(), $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(buyer_id)
        .bind(total_amount)
        .bind(PurchaseStatus::PendingPayment)
        .fetch_one(&mut *conn)
        .await?;

        Ok(purchase)
    }

    /// Bloquea la compra del comprador; un segundo pago concurrente espera y luego ve PAID
    pub async fn lock_for_buyer(
        conn: &mut PgConnection,
        id: Uuid,
        buyer_id: Uuid,
    ) -> Result<Option<Purchase>, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            "SELECT * FROM purchases WHERE id = $1 AND buyer_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(buyer_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(purchase)
    }

    pub async fn mark_paid(conn: &mut PgConnection, id: Uuid, payment_method: &str) -> Result<Purchase, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            UPDATE purchases
            SET status = $2, payment_method = $3, paid_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(PurchaseStatus::Paid)
        .bind(payment_method)
        .fetch_one(&mut *conn)
        .await?;

        Ok(purchase)
    }
}
