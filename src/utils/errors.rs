//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Índice parcial que impide vender dos veces el mismo asiento
pub const ACTIVE_SEAT_CONSTRAINT: &str = "tickets_active_seat_uq";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Inactive resource: {0}")]
    InactiveResource(String),

    #[error("Departed: {0}")]
    Departed(String),

    #[error("Seat disabled: {0}")]
    SeatDisabled(String),

    #[error("Seat occupied: {0}")]
    SeatOccupied(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Already validated: {message}")]
    AlreadyValidated {
        message: String,
        validated_at: Option<chrono::DateTime<chrono::Utc>>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ValidationErrors(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InactiveResource(_) => StatusCode::BAD_REQUEST,
            AppError::Departed(_) => StatusCode::BAD_REQUEST,
            AppError::SeatDisabled(_) => StatusCode::BAD_REQUEST,
            AppError::SeatOccupied(_) => StatusCode::CONFLICT,
            AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPrice(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyValidated { .. } => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::ValidationErrors(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InactiveResource(_) => "INACTIVE_RESOURCE",
            AppError::Departed(_) => "DEPARTED",
            AppError::SeatDisabled(_) => "SEAT_DISABLED",
            AppError::SeatOccupied(_) => "SEAT_OCCUPIED",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::InvalidPrice(_) => "INVALID_PRICE",
            AppError::AlreadyValidated { .. } => "ALREADY_VALIDATED",
            AppError::Database(_) => "PERSISTENCE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::ValidationErrors(_) => "Validation Error",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "Not Found",
            AppError::InactiveResource(_) => "Inactive Resource",
            AppError::Departed(_) => "Departed",
            AppError::SeatDisabled(_) => "Seat Disabled",
            AppError::SeatOccupied(_) => "Seat Occupied",
            AppError::InvalidState(_) => "Invalid State",
            AppError::InvalidPrice(_) => "Invalid Price",
            AppError::AlreadyValidated { .. } => "Already Validated",
            AppError::Database(_) => "Persistence Error",
            AppError::Internal(_) => "Internal Server Error",
        }
    }

    /// Traduce la violación del índice de asientos activos a un conflicto de negocio
    pub fn from_ticket_insert(error: sqlx::Error, seat_number: i32) -> Self {
        if let sqlx::Error::Database(ref db_error) = error {
            if db_error.constraint() == Some(ACTIVE_SEAT_CONSTRAINT) {
                return AppError::SeatOccupied(format!(
                    "El asiento {} ya está ocupado o reservado.",
                    seat_number
                ));
            }
        }
        AppError::Database(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code().to_string();
        let error = self.title().to_string();

        let (message, details) = match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "❌ Error de base de datos");
                (
                    "An error occurred while accessing the database".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "❌ Error interno");
                ("An unexpected error occurred".to_string(), None)
            }
            AppError::ValidationErrors(e) => {
                tracing::warn!("⚠️ Error de validación: {}", e);
                (
                    "The provided data is invalid".to_string(),
                    Some(json!(e)),
                )
            }
            AppError::AlreadyValidated { message, validated_at } => {
                tracing::warn!("⚠️ {}", message);
                (message, Some(json!({ "validated_at": validated_at })))
            }
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::InactiveResource(msg)
            | AppError::Departed(msg)
            | AppError::SeatDisabled(msg)
            | AppError::SeatOccupied(msg)
            | AppError::InvalidState(msg)
            | AppError::InvalidPrice(msg) => {
                tracing::warn!(code = %code, "⚠️ {}", msg);
                (msg, None)
            }
        };

        let body = ErrorResponse {
            error,
            message,
            details,
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}
