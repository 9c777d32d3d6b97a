use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::terminal_use::TerminalUse;

// Request del supervisor de acceso al validar un boleto
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ValidateTerminalUseRequest {
    pub ticket_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TerminalUseValidatedResponse {
    pub message: String,
    pub terminal_use: TerminalUse,
}
