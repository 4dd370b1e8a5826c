use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::models::decimal;
use crate::models::{DividendEvent, ItemType, Operation};

// Live quote and fundamentals for one symbol, as published by the market feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "decimal::from_number")]
    pub last_price: BigDecimal,
    #[serde(default, deserialize_with = "decimal::from_number")]
    pub closing_price: BigDecimal,
    #[serde(default, deserialize_with = "decimal::from_number")]
    pub change: BigDecimal,
    #[serde(default, deserialize_with = "decimal::from_number")]
    pub last_year_high: BigDecimal,
    #[serde(default, deserialize_with = "decimal::from_number")]
    pub last_year_low: BigDecimal,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub sub_sector: String,
}

/// Computed holding for one (symbol, item type) within a portfolio.
///
/// Every computed field is a pure function of `operations`,
/// `dividend_events` and `market`; see `services::position_service`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub item_type: ItemType,
    pub shares: BigDecimal,
    pub average_price: BigDecimal,
    pub cost_basis: BigDecimal,
    pub commission: BigDecimal,
    pub gain: BigDecimal,
    pub overall_return: BigDecimal,
    pub dividends: BigDecimal,
    #[serde(flatten)]
    pub market: MarketSnapshot,
    pub operations: Vec<Operation>,
    pub dividend_events: Vec<DividendEvent>,
}

impl Position {
    pub fn new(symbol: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            symbol: symbol.into(),
            item_type,
            shares: BigDecimal::default(),
            average_price: BigDecimal::default(),
            cost_basis: BigDecimal::default(),
            commission: BigDecimal::default(),
            gain: BigDecimal::default(),
            overall_return: BigDecimal::default(),
            dividends: BigDecimal::default(),
            market: MarketSnapshot::default(),
            operations: Vec::new(),
            dividend_events: Vec::new(),
        }
    }
}
