use crate::models::route::Route;
use crate::utils::errors::AppError;
use sqlx::PgConnection;
use uuid::Uuid;

pub struct RouteRepository;

impl RouteRepository {
    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Route>, AppError> {
        let result = sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(result)
    }
}
