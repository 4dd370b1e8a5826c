use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::external::market_data_provider::{MarketDataError, MarketDataProvider};
use crate::models::{DividendEvent, DividendHistory, ItemType, MarketSnapshot};

#[derive(Debug, Clone)]
pub struct FinanceApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

/// HTTP client for the finance API.
///
/// Quotes live at `{base}/{itemType}/{symbol}` and dividend histories at
/// `{base}/{itemType}/dividends/{symbol}`, with every segment percent-encoded.
/// The configured timeouts bound every request; nothing wraps a batch of
/// requests.
pub struct FinanceApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl FinanceApiClient {
    pub fn new(config: FinanceApiConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MarketDataError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MarketDataError::InvalidUrl(config.base_url));
        }

        Ok(Self { client, base_url })
    }

    // Each segment is percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, MarketDataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MarketDataError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, MarketDataError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        debug!("[FinanceAPI] Retrieving {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MarketDataError::BadResponse(format!(
                "{} returned HTTP {}",
                path, status
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for FinanceApiClient {
    async fn fetch_quote(
        &self,
        item_type: ItemType,
        symbol: &str,
    ) -> Result<MarketSnapshot, MarketDataError> {
        self.get_json(&[item_type.as_str(), symbol]).await
    }

    async fn fetch_dividends(
        &self,
        item_type: ItemType,
        symbol: &str,
    ) -> Result<Vec<DividendEvent>, MarketDataError> {
        let history: DividendHistory = self
            .get_json(&[item_type.as_str(), "dividends", symbol])
            .await?;
        Ok(history.dividends)
    }
}
