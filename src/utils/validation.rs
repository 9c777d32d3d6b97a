//! Utilidades de validación
//!
//! Este módulo contiene los extractores `ValidatedJson`, `ValidatedPath` y
//! `ValidatedQuery`, que convierten los rechazos de axum en errores 400 con el
//! cuerpo JSON de `AppError`, y funciones helper de validación.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::utils::errors::AppError;

/// Body JSON deserializado y validado con `validator`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Parámetros de ruta; un id mal formado responde 400 en JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(ValidatedPath(value))
    }
}

/// Query string deserializada con el mismo contrato de error
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(ValidatedQuery(value))
    }
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!(
            "Formato de {} inválido. Use YYYY-MM-DD.",
            field
        ))
    })
}

/// Rango de fechas opcional e inclusivo; `from` no puede superar a `to`
pub fn parse_date_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
    let from = from.map(|v| parse_date(v, "from")).transpose()?;
    let to = to.map(|v| parse_date(v, "to")).transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::Validation(
                "La fecha 'from' no puede ser posterior a 'to'.".to_string(),
            ));
        }
    }

    Ok((from, to))
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar que un precio sea estrictamente positivo
pub fn validate_positive_price(value: Decimal, field: &str) -> Result<(), AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::InvalidPrice(format!(
            "El {} debe ser un número positivo.",
            field
        )));
    }
    Ok(())
}

/// Mayor monto que admiten las columnas NUMERIC(12, 2)
pub fn max_storable_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Redondea a centavos como lo hace PostgreSQL y exige un precio positivo que
/// quepa en la columna. El valor devuelto es el que se valida y se guarda.
pub fn normalize_price(value: Decimal, field: &str) -> Result<Decimal, AppError> {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    validate_positive_price(rounded, field)?;
    if rounded > max_storable_price() {
        return Err(AppError::InvalidPrice(format!(
            "El {} supera el máximo admitido ({}).",
            field,
            max_storable_price()
        )));
    }
    Ok(rounded)
}
