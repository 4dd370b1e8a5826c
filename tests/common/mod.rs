//! In-memory ledger and market data used by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use wallet_backend::errors::AppError;
use wallet_backend::external::market_data_provider::{MarketDataError, MarketDataProvider};
use wallet_backend::models::{
    DividendEvent, FixedIncomeTrade, ItemType, MarketSnapshot, Operation, OperationKind,
    PortfolioRecord, Tradable, Trade,
};
use wallet_backend::store::LedgerStore;

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn portfolio(id: &str, name: &str) -> PortfolioRecord {
    PortfolioRecord {
        id: id.to_string(),
        name: name.to_string(),
        created_at: day(2020, 1, 1),
    }
}

pub fn trade(
    portfolio_id: &str,
    symbol: &str,
    date: DateTime<Utc>,
    kind: OperationKind,
    shares: &str,
    price: &str,
    commission: &str,
) -> Trade {
    Trade {
        id: Uuid::new_v4(),
        symbol: symbol.to_string(),
        date,
        price: dec(price),
        shares: dec(shares),
        commission: dec(commission),
        kind,
        broker_slug: "clear".to_string(),
        portfolio_id: portfolio_id.to_string(),
    }
}

pub fn operation(item_type: ItemType, trade: Trade) -> Operation {
    match item_type {
        ItemType::Stock => Operation::Stock(trade),
        ItemType::Fii => Operation::Fii(trade),
        ItemType::StockFund => Operation::StockFund(trade),
        ItemType::Ficfi => Operation::Ficfi(trade),
        ItemType::CertificateOfDeposit => Operation::CertificateOfDeposit(FixedIncomeTrade {
            trade,
            due_date: None,
            fixed_interest_rate: None,
        }),
        ItemType::TreasuryDirect => Operation::TreasuryDirect(FixedIncomeTrade {
            trade,
            due_date: None,
            fixed_interest_rate: None,
        }),
    }
}

#[derive(Default)]
pub struct FakeLedger {
    pub portfolios: Vec<PortfolioRecord>,
    pub operations: Vec<Operation>,
    // Symbols whose ledger read fails.
    pub broken_symbols: HashSet<String>,
}

impl FakeLedger {
    pub fn new(portfolios: Vec<PortfolioRecord>) -> Self {
        Self {
            portfolios,
            ..Self::default()
        }
    }

    pub fn with(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn broken(mut self, symbol: &str) -> Self {
        self.broken_symbols.insert(symbol.to_string());
        self
    }

    fn in_portfolio<'a>(&'a self, portfolio_id: &'a str) -> impl Iterator<Item = &'a Operation> + 'a {
        self.operations
            .iter()
            .filter(move |op| op.trade().portfolio_id == portfolio_id)
    }
}

#[async_trait]
impl LedgerStore for FakeLedger {
    async fn fetch_portfolio(&self, id: &str) -> Result<Option<PortfolioRecord>, AppError> {
        Ok(self.portfolios.iter().find(|p| p.id == id).cloned())
    }

    async fn fetch_portfolios(&self) -> Result<Vec<PortfolioRecord>, AppError> {
        Ok(self.portfolios.clone())
    }

    async fn distinct_item_types(&self, portfolio_id: &str) -> Result<Vec<ItemType>, AppError> {
        let types: BTreeSet<ItemType> = self.in_portfolio(portfolio_id).map(|op| op.item_type()).collect();
        Ok(types.into_iter().collect())
    }

    async fn distinct_symbols(
        &self,
        portfolio_id: &str,
        item_type: ItemType,
    ) -> Result<Vec<String>, AppError> {
        let symbols: BTreeSet<String> = self
            .in_portfolio(portfolio_id)
            .filter(|op| op.item_type() == item_type)
            .map(|op| op.symbol().to_string())
            .collect();
        Ok(symbols.into_iter().collect())
    }

    async fn operations_for_symbol(
        &self,
        portfolio_id: &str,
        symbol: &str,
        item_type: ItemType,
        before: DateTime<Utc>,
    ) -> Result<Vec<Operation>, AppError> {
        if self.broken_symbols.contains(symbol) {
            return Err(AppError::Ledger(format!("Item type 'crypto' not found for {}", symbol)));
        }
        let mut operations: Vec<Operation> = self
            .in_portfolio(portfolio_id)
            .filter(|op| op.item_type() == item_type && op.symbol() == symbol && op.date() < before)
            .cloned()
            .collect();
        operations.sort_by_key(|op| op.date());
        Ok(operations)
    }
}

#[derive(Default)]
pub struct FakeMarket {
    pub prices: HashMap<String, BigDecimal>,
    pub dividends: HashMap<String, Vec<DividendEvent>>,
    pub unreachable: HashSet<String>,
    pub quote_calls: AtomicUsize,
}

impl FakeMarket {
    pub fn price(mut self, symbol: &str, price: &str) -> Self {
        self.prices.insert(symbol.to_string(), dec(price));
        self
    }

    pub fn dividend(mut self, symbol: &str, event: DividendEvent) -> Self {
        self.dividends.entry(symbol.to_string()).or_default().push(event);
        self
    }

    pub fn unreachable(mut self, symbol: &str) -> Self {
        self.unreachable.insert(symbol.to_string());
        self
    }
}

#[async_trait]
impl MarketDataProvider for FakeMarket {
    async fn fetch_quote(
        &self,
        _item_type: ItemType,
        symbol: &str,
    ) -> Result<MarketSnapshot, MarketDataError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.contains(symbol) {
            return Err(MarketDataError::Network(format!("timeout fetching {}", symbol)));
        }
        Ok(MarketSnapshot {
            name: format!("{} S.A.", symbol),
            last_price: self.prices.get(symbol).cloned().unwrap_or_default(),
            closing_price: self.prices.get(symbol).cloned().unwrap_or_default(),
            sector: "Financeiro".to_string(),
            ..MarketSnapshot::default()
        })
    }

    async fn fetch_dividends(
        &self,
        _item_type: ItemType,
        symbol: &str,
    ) -> Result<Vec<DividendEvent>, MarketDataError> {
        if self.unreachable.contains(symbol) {
            return Err(MarketDataError::Network(format!("timeout fetching {}", symbol)));
        }
        Ok(self.dividends.get(symbol).cloned().unwrap_or_default())
    }
}
