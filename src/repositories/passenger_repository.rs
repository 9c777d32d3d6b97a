use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::passenger::{NewPassenger, Passenger};
use crate::utils::errors::AppError;

pub struct PassengerRepository;

impl PassengerRepository {
    /// Busca por documento o crea el pasajero; si ya existe se reutiliza sin modificarlo
    pub async fn find_or_create(conn: &mut PgConnection, passenger: &NewPassenger) -> Result<Passenger, AppError> {
        let inserted = sqlx::query_as::<_, Passenger>(
            r#"
            INSERT INTO passengers (id, name, surname, document_type, document_number, birth_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (document_type, document_number) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&passenger.name)
        .bind(&passenger.surname)
        .bind(&passenger.document_type)
        .bind(&passenger.document_number)
        .bind(passenger.birth_date)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(created) = inserted {
            log::info!("🧍 Pasajero creado: {} {}", created.document_type, created.document_number);
            return Ok(created);
        }

        let existing = sqlx::query_as::<_, Passenger>(
            "SELECT * FROM passengers WHERE document_type = $1 AND document_number = $2",
        )
        .bind(&passenger.document_type)
        .bind(&passenger.document_number)
        .fetch_one(&mut *conn)
        .await?;

        Ok(existing)
    }
}
