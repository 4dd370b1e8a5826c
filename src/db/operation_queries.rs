use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::OperationRecord;

pub async fn fetch_item_types(pool: &PgPool, portfolio_id: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT item_type
         FROM operations
         WHERE portfolio_id = $1
         ORDER BY item_type",
    )
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_symbols(
    pool: &PgPool,
    portfolio_id: &str,
    item_type: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT symbol
         FROM operations
         WHERE portfolio_id = $1 AND item_type = $2
         ORDER BY symbol",
    )
    .bind(portfolio_id)
    .bind(item_type)
    .fetch_all(pool)
    .await
}

// Ascending by date; same-date rows keep insertion order.
pub async fn fetch_by_symbol(
    pool: &PgPool,
    portfolio_id: &str,
    symbol: &str,
    item_type: &str,
    before: DateTime<Utc>,
) -> Result<Vec<OperationRecord>, sqlx::Error> {
    sqlx::query_as::<_, OperationRecord>(
        "SELECT id, portfolio_id, item_type, symbol, kind, date, price, shares,
                commission, broker_slug, due_date, fixed_interest_rate
         FROM operations
         WHERE portfolio_id = $1 AND symbol = $2 AND item_type = $3 AND date < $4
         ORDER BY date ASC, created_at ASC, id ASC",
    )
    .bind(portfolio_id)
    .bind(symbol)
    .bind(item_type)
    .bind(before)
    .fetch_all(pool)
    .await
}
