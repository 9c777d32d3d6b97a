use crate::models::bus::Bus;
use crate::utils::errors::AppError;
use sqlx::PgConnection;
use uuid::Uuid;

pub struct BusRepository;

impl BusRepository {
    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Bus>, AppError> {
        let result = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(result)
    }
}
