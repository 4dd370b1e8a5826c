use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ItemType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Purchase,
    Sale,
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(OperationKind::Purchase),
            "sale" => Ok(OperationKind::Sale),
            other => Err(format!("Operation kind '{}' not found", other)),
        }
    }
}

// Fields every buy or sell record carries, whatever the asset category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    pub symbol: String,
    pub date: DateTime<Utc>,
    pub price: BigDecimal,
    pub shares: BigDecimal,
    pub commission: BigDecimal,
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub broker_slug: String,
    pub portfolio_id: String,
}

// Fixed-income instruments also record their maturity and contracted rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedIncomeTrade {
    #[serde(flatten)]
    pub trade: Trade,
    pub due_date: Option<DateTime<Utc>>,
    pub fixed_interest_rate: Option<BigDecimal>,
}

/// A single buy or sell record, tagged by asset category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "itemType")]
pub enum Operation {
    #[serde(rename = "stocks")]
    Stock(Trade),
    #[serde(rename = "fiis")]
    Fii(Trade),
    #[serde(rename = "certificate-of-deposit")]
    CertificateOfDeposit(FixedIncomeTrade),
    #[serde(rename = "treasury-direct")]
    TreasuryDirect(FixedIncomeTrade),
    #[serde(rename = "stocks-funds")]
    StockFund(Trade),
    #[serde(rename = "ficfi")]
    Ficfi(Trade),
}

/// Read-only view over an operation, shared by every asset category.
pub trait Tradable {
    fn price(&self) -> &BigDecimal;
    fn shares(&self) -> &BigDecimal;
    fn commission(&self) -> &BigDecimal;
    fn kind(&self) -> OperationKind;
    fn date(&self) -> DateTime<Utc>;
    fn broker_slug(&self) -> &str;
    fn item_type(&self) -> ItemType;
}

impl Operation {
    pub fn trade(&self) -> &Trade {
        match self {
            Operation::Stock(trade)
            | Operation::Fii(trade)
            | Operation::StockFund(trade)
            | Operation::Ficfi(trade) => trade,
            Operation::CertificateOfDeposit(fixed) | Operation::TreasuryDirect(fixed) => &fixed.trade,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.trade().symbol
    }

    /// Builds the variant matching the record's item type string.
    pub fn from_record(record: OperationRecord) -> Result<Operation, String> {
        let item_type: ItemType = record.item_type.parse()?;
        let kind: OperationKind = record.kind.parse()?;

        let trade = Trade {
            id: record.id,
            symbol: record.symbol,
            date: record.date,
            price: record.price,
            shares: record.shares,
            commission: record.commission,
            kind,
            broker_slug: record.broker_slug,
            portfolio_id: record.portfolio_id,
        };

        let operation = match item_type {
            ItemType::Stock => Operation::Stock(trade),
            ItemType::Fii => Operation::Fii(trade),
            ItemType::StockFund => Operation::StockFund(trade),
            ItemType::Ficfi => Operation::Ficfi(trade),
            ItemType::CertificateOfDeposit => Operation::CertificateOfDeposit(FixedIncomeTrade {
                trade,
                due_date: record.due_date,
                fixed_interest_rate: record.fixed_interest_rate,
            }),
            ItemType::TreasuryDirect => Operation::TreasuryDirect(FixedIncomeTrade {
                trade,
                due_date: record.due_date,
                fixed_interest_rate: record.fixed_interest_rate,
            }),
        };
        Ok(operation)
    }
}

impl Tradable for Operation {
    fn price(&self) -> &BigDecimal {
        &self.trade().price
    }

    fn shares(&self) -> &BigDecimal {
        &self.trade().shares
    }

    fn commission(&self) -> &BigDecimal {
        &self.trade().commission
    }

    fn kind(&self) -> OperationKind {
        self.trade().kind
    }

    fn date(&self) -> DateTime<Utc> {
        self.trade().date
    }

    fn broker_slug(&self) -> &str {
        &self.trade().broker_slug
    }

    fn item_type(&self) -> ItemType {
        match self {
            Operation::Stock(_) => ItemType::Stock,
            Operation::Fii(_) => ItemType::Fii,
            Operation::CertificateOfDeposit(_) => ItemType::CertificateOfDeposit,
            Operation::TreasuryDirect(_) => ItemType::TreasuryDirect,
            Operation::StockFund(_) => ItemType::StockFund,
            Operation::Ficfi(_) => ItemType::Ficfi,
        }
    }
}

// Untyped row as stored in the operations table.
#[derive(Debug, Clone, FromRow)]
pub struct OperationRecord {
    pub id: Uuid,
    pub portfolio_id: String,
    pub item_type: String,
    pub symbol: String,
    pub kind: String,
    pub date: DateTime<Utc>,
    pub price: BigDecimal,
    pub shares: BigDecimal,
    pub commission: BigDecimal,
    pub broker_slug: String,
    pub due_date: Option<DateTime<Utc>>,
    pub fixed_interest_rate: Option<BigDecimal>,
}
