//! Modelo de Passenger
//!
//! El par (document_type, document_number) es la clave natural: un pasajero se
//! crea en su primera compra y se reutiliza tal cual en las siguientes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Passenger {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub document_type: String,
    pub document_number: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Datos personales necesarios para crear un pasajero
#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub name: String,
    pub surname: String,
    pub document_type: String,
    pub document_number: String,
    pub birth_date: NaiveDate,
}
