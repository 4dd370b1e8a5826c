use sqlx::PgPool;

use crate::models::PortfolioRecord;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<PortfolioRecord>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioRecord>(
        "SELECT id, name, created_at
         FROM portfolios
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: &str) -> Result<Option<PortfolioRecord>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioRecord>(
        "SELECT id, name, created_at
         FROM portfolios
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
