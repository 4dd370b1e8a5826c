use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::Position;

// A named grouping of operations, as persisted. Only this metadata is stored;
// the computed view below is rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PortfolioRecord {
    pub id: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub cost_basis: BigDecimal,
    pub gain: BigDecimal,
    pub overall_return: BigDecimal,
    pub items: BTreeMap<String, Position>,
}

impl Portfolio {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost_basis: BigDecimal::default(),
            gain: BigDecimal::default(),
            overall_return: BigDecimal::default(),
            items: BTreeMap::new(),
        }
    }
}

impl From<&PortfolioRecord> for Portfolio {
    fn from(record: &PortfolioRecord) -> Self {
        Portfolio::new(record.id.clone(), record.name.clone())
    }
}
