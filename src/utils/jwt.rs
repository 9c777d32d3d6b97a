//! Utilidades JWT
//!
//! Los tokens los emite el servicio de autenticación; aquí solo se verifican
//! y se decodifican los claims de identidad y roles.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auth::{AuthenticatedUser, Role};
use crate::utils::errors::AppError;

/// Claims del JWT emitido por el servicio de autenticación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,              // id del usuario
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
}

impl From<JwtClaims> for AuthenticatedUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            id: claims.sub,
            roles: claims.roles.iter().filter_map(|r| r.parse::<Role>().ok()).collect(),
            company_id: claims.company_id,
        }
    }
}

/// Verificar y decodificar JWT token (HS256, expiración obligatoria)
pub fn verify_token(token: &str, secret: &str) -> Result<JwtClaims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<JwtClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            log::debug!("🔐 Token rechazado: {}", e);
            AppError::Unauthorized("Token inválido o expirado".to_string())
        })
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AppError::Unauthorized("Header Authorization debe comenzar con 'Bearer '".to_string())
        })?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "secreto-de-prueba";

    fn sign(claims: &JwtClaims, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn claims(exp_offset: i64) -> JwtClaims {
        JwtClaims {
            sub: Uuid::new_v4(),
            roles: vec!["Cliente".to_string(), "RolDesconocido".to_string()],
            company_id: None,
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            iat: None,
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let original = claims(3600);
        let token = sign(&original, SECRET);
        let decoded = verify_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, original.sub);

        let user: AuthenticatedUser = decoded.into();
        assert_eq!(user.roles, vec![Role::Cliente]);
    }

    #[test]
    fn test_reject_wrong_secret_and_expired() {
        let token = sign(&claims(3600), "otro-secreto");
        assert!(matches!(verify_token(&token, SECRET), Err(AppError::Unauthorized(_))));

        let expired = sign(&claims(-3600), SECRET);
        assert!(verify_token(&expired, SECRET).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic xyz").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
