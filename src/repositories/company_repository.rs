use crate::models::company::Company;
use crate::utils::errors::AppError;
use sqlx::PgConnection;
use uuid::Uuid;

pub struct CompanyRepository;

impl CompanyRepository {
    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(result)
    }
}
