//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL definido en `migrations/`.

pub mod auth;
pub mod bus;
pub mod company;
pub mod passenger;
pub mod price_adjustment;
pub mod pricing_policy;
pub mod purchase;
pub mod route;
pub mod schedule;
pub mod seat;
pub mod terminal_use;
pub mod ticket;
