use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::{ItemType, Operation, PortfolioRecord};

pub mod postgres;

pub use postgres::PgLedgerStore;

/// Read-only access to the operation ledger. The position engine never writes.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn fetch_portfolio(&self, id: &str) -> Result<Option<PortfolioRecord>, AppError>;

    async fn fetch_portfolios(&self) -> Result<Vec<PortfolioRecord>, AppError>;

    async fn distinct_item_types(&self, portfolio_id: &str) -> Result<Vec<ItemType>, AppError>;

    async fn distinct_symbols(
        &self,
        portfolio_id: &str,
        item_type: ItemType,
    ) -> Result<Vec<String>, AppError>;

    /// Operations dated strictly before `before`, ascending by date.
    async fn operations_for_symbol(
        &self,
        portfolio_id: &str,
        symbol: &str,
        item_type: ItemType,
        before: DateTime<Utc>,
    ) -> Result<Vec<Operation>, AppError>;
}
