use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Asset category an operation belongs to. Positions are grouped by
/// (symbol, item type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "stocks")]
    Stock,
    #[serde(rename = "fiis")]
    Fii,
    #[serde(rename = "certificate-of-deposit")]
    CertificateOfDeposit,
    #[serde(rename = "treasury-direct")]
    TreasuryDirect,
    #[serde(rename = "stocks-funds")]
    StockFund,
    #[serde(rename = "ficfi")]
    Ficfi,
}

impl ItemType {
    pub const ALL: [ItemType; 6] = [
        ItemType::Stock,
        ItemType::Fii,
        ItemType::CertificateOfDeposit,
        ItemType::TreasuryDirect,
        ItemType::StockFund,
        ItemType::Ficfi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Stock => "stocks",
            ItemType::Fii => "fiis",
            ItemType::CertificateOfDeposit => "certificate-of-deposit",
            ItemType::TreasuryDirect => "treasury-direct",
            ItemType::StockFund => "stocks-funds",
            ItemType::Ficfi => "ficfi",
        }
    }

    /// Only listed equities and real-estate funds report gain and overall
    /// return; every other category reports zero.
    pub fn reports_gain(&self) -> bool {
        matches!(self, ItemType::Stock | ItemType::Fii)
    }

    /// Item types the dividend feed publishes a history for.
    pub fn pays_dividends(&self) -> bool {
        matches!(self, ItemType::Stock | ItemType::Fii)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .iter()
            .copied()
            .find(|item_type| item_type.as_str() == s)
            .ok_or_else(|| format!("Item type '{}' not found", s))
    }
}
