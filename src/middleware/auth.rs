//! Middleware de autenticación JWT
//! 
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de roles de los usuarios autenticados.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{
    models::auth::{AuthenticatedUser, Role},
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("Token de autorización requerido".to_string())
        })?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.config.jwt_secret)?;

    // Inyectar usuario autenticado en las extensions
    let authenticated_user = AuthenticatedUser::from(claims);
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Middleware que exige al menos uno de los roles indicados
pub async fn require_roles(
    State(allowed): State<&'static [Role]>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let permitted = match request.extensions().get::<AuthenticatedUser>() {
        Some(user) => user.has_any_role(allowed),
        None => return Err(AppError::Unauthorized("Autenticación requerida".to_string())),
    };

    if !permitted {
        let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
        log::warn!("🚫 Acceso denegado a {}: requiere {:?}", request.uri().path(), names);
        return Err(AppError::Forbidden(format!(
            "Se requiere uno de los roles: {}",
            names.join(", ")
        )));
    }

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Autenticación requerida".to_string()))
    }
}
