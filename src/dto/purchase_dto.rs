use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::passenger::NewPassenger;
use crate::models::purchase::Purchase;
use crate::models::terminal_use::TerminalUse;
use crate::models::ticket::Ticket;
use crate::utils::validation::validate_not_blank;

fn validate_birth_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Local::now().date_naive() {
        return Err(ValidationError::new("birth_date_in_future"));
    }
    Ok(())
}

// Datos del pasajero dentro de la compra
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PassengerRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub surname: String,
    #[serde(alias = "doc_type")]
    #[validate(length(min = 1, max = 20), custom = "validate_not_blank")]
    pub document_type: String,
    #[serde(alias = "doc_number")]
    #[validate(length(min = 3, max = 50), custom = "validate_not_blank")]
    pub document_number: String,
    #[validate(custom = "validate_birth_date")]
    pub birth_date: NaiveDate,
}

impl From<PassengerRequest> for NewPassenger {
    fn from(request: PassengerRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            surname: request.surname.trim().to_string(),
            document_type: request.document_type.trim().to_uppercase(),
            document_number: request.document_number.trim().to_string(),
            birth_date: request.birth_date,
        }
    }
}

// Request para iniciar una compra
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
    pub schedule_id: Uuid,
    #[validate(range(min = 1))]
    pub seat_number: i32,
    #[validate]
    pub passenger: PassengerRequest,
}

// Request para pagar una compra
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PayPurchaseRequest {
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
}

// Compra recién creada con su boleto
#[derive(Debug, Serialize)]
pub struct PurchaseCreatedResponse {
    pub message: String,
    pub purchase: Purchase,
    pub ticket: Ticket,
}

// Compra pagada con sus boletos confirmados
#[derive(Debug, Serialize)]
pub struct PaidPurchase {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub tickets: Vec<Ticket>,
    pub terminal_uses: Vec<TerminalUse>,
}

#[derive(Debug, Serialize)]
pub struct PurchasePaidResponse {
    pub message: String,
    pub purchase: PaidPurchase,
}
