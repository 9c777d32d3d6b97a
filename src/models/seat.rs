//! Modelo de SeatConfiguration
//!
//! Inventario físico de asientos de un bus. `enabled_on_bus` indica si el
//! asiento existe y funciona, no si está vendido en un horario.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeatConfiguration {
    pub id: Uuid,
    pub bus_id: Uuid,
    pub seat_number: i32,
    pub floor: i32,
    pub seat_type: String,
    pub enabled_on_bus: bool,
}
