//! Validación del uso de terminal en el acceso

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::terminal_use::TerminalUse;
use crate::repositories::TerminalUseRepository;
use crate::utils::errors::{AppError, AppResult};

pub fn ensure_not_validated(terminal_use: &TerminalUse) -> Result<(), AppError> {
    if terminal_use.validated {
        return Err(AppError::AlreadyValidated {
            message: format!("El uso de terminal del boleto {} ya fue validado.", terminal_use.ticket_id),
            validated_at: terminal_use.validated_at,
        });
    }
    Ok(())
}

pub struct TerminalService {
    pool: PgPool,
}

impl TerminalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn validate_terminal_use(&self, ticket_id: Uuid) -> AppResult<TerminalUse> {
        let mut tx = self.pool.begin().await?;

        let terminal_use = TerminalUseRepository::lock_by_ticket(&mut *tx, ticket_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No hay uso de terminal registrado para el boleto {}.", ticket_id))
            })?;

        if let Err(error) = ensure_not_validated(&terminal_use) {
            log::warn!("⚠️ Uso de terminal ya validado para el boleto {}", ticket_id);
            return Err(error);
        }

        let terminal_use = TerminalUseRepository::mark_validated(&mut *tx, terminal_use.id).await?;
        tx.commit().await?;

        log::info!("🚪 Uso de terminal validado para el boleto {}", ticket_id);
        Ok(terminal_use)
    }
}
