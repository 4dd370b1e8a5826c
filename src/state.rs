use std::sync::Arc;

use crate::external::market_data_provider::MarketDataProvider;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub market_data: Arc<dyn MarketDataProvider>,
}
