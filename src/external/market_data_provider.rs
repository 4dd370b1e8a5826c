use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DividendEvent, ItemType, MarketSnapshot};

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Source of live quotes and dividend histories.
///
/// One call is one attempt; implementations do not retry.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_quote(
        &self,
        item_type: ItemType,
        symbol: &str,
    ) -> Result<MarketSnapshot, MarketDataError>;

    async fn fetch_dividends(
        &self,
        item_type: ItemType,
        symbol: &str,
    ) -> Result<Vec<DividendEvent>, MarketDataError>;
}
