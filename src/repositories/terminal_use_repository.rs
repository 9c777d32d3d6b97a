use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::terminal_use::TerminalUse;
use crate::utils::errors::AppError;

pub struct TerminalUseRepository;

impl TerminalUseRepository {
    pub async fn create(conn: &mut PgConnection, ticket_id: Uuid, fee_amount: Decimal) -> Result<TerminalUse, AppError> {
        let terminal_use = sqlx::query_as::<_, TerminalUse>(
            r#"
            INSERT INTO terminal_uses (id, ticket_id, fee_amount, validated, created_at)
            VALUES ($1, $2, $3, FALSE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ticket_id)
        .bind(fee_amount)
        .fetch_one(&mut *conn)
        .await?;

        Ok(terminal_use)
    }

    pub async fn lock_by_ticket(conn: &mut PgConnection, ticket_id: Uuid) -> Result<Option<TerminalUse>, AppError> {
        let terminal_use = sqlx::query_as::<_, TerminalUse>(
            "SELECT * FROM terminal_uses WHERE ticket_id = $1 FOR UPDATE",
        )
        .bind(ticket_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(terminal_use)
    }

    pub async fn mark_validated(conn: &mut PgConnection, id: Uuid) -> Result<TerminalUse, AppError> {
        let terminal_use = sqlx::query_as::<_, TerminalUse>(
            "UPDATE terminal_uses SET validated = TRUE, validated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(terminal_use)
    }
}
