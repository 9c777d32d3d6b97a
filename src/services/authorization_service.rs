//! Alcance de los administradores sobre las empresas
//!
//! El administrador de terminal opera sobre cualquier empresa; el de empresa
//! solo sobre la suya, identificada por el `company_id` del token.

use uuid::Uuid;

use crate::models::auth::{AuthenticatedUser, Role};
use crate::models::price_adjustment::AdjustmentType;
use crate::utils::errors::{forbidden_error, AppError};

/// Verifica el acceso a `company_id` y devuelve el tipo de ajuste que
/// corresponde al actor
pub fn company_scope(
    actor: &AuthenticatedUser,
    company_id: Uuid,
    operation: &str,
) -> Result<AdjustmentType, AppError> {
    if actor.has_role(Role::AdministradorTerminal) {
        return Ok(AdjustmentType::ManualTerminalAdmin);
    }

    if !actor.has_role(Role::AdministradorEmpresa) {
        return Err(forbidden_error(operation, "rol no autorizado"));
    }

    match actor.company_id {
        Some(own) if own == company_id => Ok(AdjustmentType::ManualCompanyAdmin),
        Some(_) => Err(forbidden_error(operation, "el recurso pertenece a otra empresa")),
        None => Err(forbidden_error(operation, "el usuario no tiene empresa asignada")),
    }
}

/// Empresa propia del administrador de empresa
pub fn own_company(actor: &AuthenticatedUser, operation: &str) -> Result<Uuid, AppError> {
    if !actor.has_role(Role::AdministradorEmpresa) {
        return Err(forbidden_error(operation, "rol no autorizado"));
    }
    actor
        .company_id
        .ok_or_else(|| forbidden_error(operation, "el usuario no tiene empresa asignada"))
}
