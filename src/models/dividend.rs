use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::decimal;

// A dividend declared for a symbol. Which date decides eligibility depends on
// the item type: `date` for stocks, `declared_date` for real-estate funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendEvent {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub declared_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pay_date: Option<DateTime<Utc>>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(deserialize_with = "decimal::from_number")]
    pub value: BigDecimal,
}

// Payload of the dividend feed for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendHistory {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub dividends: Vec<DividendEvent>,
}
