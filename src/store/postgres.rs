use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error};

use crate::db;
use crate::errors::AppError;
use crate::models::{ItemType, Operation, PortfolioRecord};
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn fetch_portfolio(&self, id: &str) -> Result<Option<PortfolioRecord>, AppError> {
        debug!("[DB] fetch_portfolio {}", id);
        Ok(db::portfolio_queries::fetch_one(&self.pool, id).await?)
    }

    async fn fetch_portfolios(&self) -> Result<Vec<PortfolioRecord>, AppError> {
        debug!("[DB] fetch_portfolios");
        Ok(db::portfolio_queries::fetch_all(&self.pool).await?)
    }

    async fn distinct_item_types(&self, portfolio_id: &str) -> Result<Vec<ItemType>, AppError> {
        debug!("[DB] distinct_item_types {}", portfolio_id);
        db::operation_queries::fetch_item_types(&self.pool, portfolio_id)
            .await?
            .iter()
            .map(|raw| {
                raw.parse::<ItemType>().map_err(|e| {
                    error!("[DB] Portfolio {} has operations of unknown type: {}", portfolio_id, e);
                    AppError::Ledger(e)
                })
            })
            .collect()
    }

    async fn distinct_symbols(
        &self,
        portfolio_id: &str,
        item_type: ItemType,
    ) -> Result<Vec<String>, AppError> {
        debug!("[DB] distinct_symbols {} {}", portfolio_id, item_type);
        Ok(db::operation_queries::fetch_symbols(&self.pool, portfolio_id, item_type.as_str()).await?)
    }

    async fn operations_for_symbol(
        &self,
        portfolio_id: &str,
        symbol: &str,
        item_type: ItemType,
        before: DateTime<Utc>,
    ) -> Result<Vec<Operation>, AppError> {
        debug!("[DB] operations_for_symbol {} {} {} before {}", portfolio_id, item_type, symbol, before);
        let records = db::operation_queries::fetch_by_symbol(
            &self.pool,
            portfolio_id,
            symbol,
            item_type.as_str(),
            before,
        )
        .await?;

        records
            .into_iter()
            .map(|record| {
                let id = record.id;
                Operation::from_record(record).map_err(|e| {
                    error!("[DB] Operation {} could not be decoded: {}", id, e);
                    AppError::Ledger(e)
                })
            })
            .collect()
    }
}
