use std::collections::{BTreeSet, HashMap};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::external::market_data_provider::MarketDataProvider;
use crate::models::{DividendEvent, ItemType, MarketSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey {
    pub item_type: ItemType,
    pub symbol: String,
}

impl SymbolKey {
    pub fn new(item_type: ItemType, symbol: impl Into<String>) -> Self {
        Self {
            item_type,
            symbol: symbol.into(),
        }
    }
}

/// Market data gathered for a set of symbols. Lookups for a symbol whose
/// fetch failed return empty defaults.
#[derive(Debug, Default)]
pub struct Enrichment {
    quotes: HashMap<SymbolKey, MarketSnapshot>,
    dividends: HashMap<SymbolKey, Vec<DividendEvent>>,
    failed: BTreeSet<SymbolKey>,
}

impl Enrichment {
    pub fn quote(&self, key: &SymbolKey) -> MarketSnapshot {
        self.quotes.get(key).cloned().unwrap_or_default()
    }

    pub fn dividends(&self, key: &SymbolKey) -> Vec<DividendEvent> {
        self.dividends.get(key).cloned().unwrap_or_default()
    }

    /// Symbols for which at least one fetch failed.
    pub fn failed(&self) -> &BTreeSet<SymbolKey> {
        &self.failed
    }
}

/// Fetches quotes for every key, and dividend histories for item types that
/// pay them, all concurrently.
///
/// Returns once every request has completed or failed. A failed request is
/// logged and leaves that symbol's data at defaults; it never affects other
/// symbols. Results are merged by key, so completion order is irrelevant.
pub async fn fetch_all(provider: &dyn MarketDataProvider, keys: &[SymbolKey]) -> Enrichment {
    let unique: BTreeSet<&SymbolKey> = keys.iter().collect();

    let quote_requests = unique.iter().map(|key| async move {
        let result = provider.fetch_quote(key.item_type, &key.symbol).await;
        (*key, result)
    });
    let dividend_requests = unique
        .iter()
        .filter(|key| key.item_type.pays_dividends())
        .map(|key| async move {
            let result = provider.fetch_dividends(key.item_type, &key.symbol).await;
            (*key, result)
        });

    let (quotes, dividends) =
        futures::future::join(join_all(quote_requests), join_all(dividend_requests)).await;

    let mut enrichment = Enrichment::default();
    for (key, result) in quotes {
        match result {
            Ok(snapshot) => {
                debug!("[FinanceAPI] {}/{} quote fetched", key.item_type, key.symbol);
                enrichment.quotes.insert(key.clone(), snapshot);
            }
            Err(e) => {
                warn!("Error on get {} quote for {}: {}", key.item_type, key.symbol, e);
                enrichment.failed.insert(key.clone());
            }
        }
    }
    for (key, result) in dividends {
        match result {
            Ok(events) => {
                debug!(
                    "[FinanceAPI] {}/{} dividends fetched ({} events)",
                    key.item_type,
                    key.symbol,
                    events.len()
                );
                enrichment.dividends.insert(key.clone(), events);
            }
            Err(e) => {
                warn!("Error on get {} dividends for {}: {}", key.item_type, key.symbol, e);
                enrichment.failed.insert(key.clone());
            }
        }
    }
    enrichment
}
