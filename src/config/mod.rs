//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y parámetros de negocio de la venta de boletos.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;
