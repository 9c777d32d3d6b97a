//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

/// Parámetros de negocio del núcleo de venta
#[derive(Debug, Clone, PartialEq)]
pub struct TicketingConfig {
    /// Tasa de uso de terminal que se registra por cada boleto confirmado
    pub terminal_use_fee: Decimal,
    /// Medio de pago cuando la solicitud no indica uno
    pub default_payment_method: String,
}

impl Default for TicketingConfig {
    fn default() -> Self {
        Self {
            terminal_use_fee: Decimal::new(100, 2),
            default_payment_method: "TARJETA_SIMULADA".to_string(),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    pub ticketing: TicketingConfig,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(name, default)
        .trim()
        .parse()
        .with_context(|| format!("{} must be a valid value", name))
}

impl EnvironmentConfig {
    /// Carga la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let cors_origins = var_or("CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let ticketing = TicketingConfig {
            terminal_use_fee: parse_var("TARIFA_USO_TERMINAL", "1.00")?,
            default_payment_method: var_or("DEFAULT_PAYMENT_METHOD", "TARJETA_SIMULADA"),
        };

        if ticketing.terminal_use_fee < Decimal::ZERO {
            anyhow::bail!("TARIFA_USO_TERMINAL must not be negative");
        }

        Ok(Self {
            environment: var_or("ENVIRONMENT", "development"),
            port: parse_var("PORT", "3000")?,
            host: var_or("HOST", "0.0.0.0"),
            jwt_secret,
            cors_origins,
            ticketing,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticketing_defaults() {
        let config = TicketingConfig::default();
        assert_eq!(config.terminal_use_fee, Decimal::new(100, 2));
        assert_eq!(config.default_payment_method, "TARJETA_SIMULADA");
    }

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "secret".to_string(),
            cors_origins: vec![],
            ticketing: TicketingConfig::default(),
        };
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.is_development());
    }
}
