//! Middleware del sistema
//! 
//! Este módulo contiene el middleware de autenticación, verificación de roles
//! y CORS.

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, require_roles};
pub use cors::cors_layer;
