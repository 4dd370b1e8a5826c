use bigdecimal::{BigDecimal, One, Zero};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{OperationKind, Tradable};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountingError {
    #[error("sale of {shares} {symbol} on {date} with no shares held")]
    SaleWithoutHoldings {
        symbol: String,
        date: DateTime<Utc>,
        shares: BigDecimal,
    },
}

/// Ceiling to two decimal places: `ceil(n * 100) / 100`.
///
/// This is deliberately not round-half-even; `1.001` becomes `1.01`.
pub fn round2(n: &BigDecimal) -> BigDecimal {
    let hundred = BigDecimal::from(100);
    let scaled = n * &hundred;
    // with_scale truncates toward zero
    let truncated = scaled.with_scale(0);
    let ceiled = if truncated < scaled {
        truncated + BigDecimal::one()
    } else {
        truncated
    };
    (ceiled / hundred).with_scale(2)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostBasisSummary {
    pub shares: BigDecimal,
    pub commission: BigDecimal,
    pub cost_basis: BigDecimal,
    pub average_price: BigDecimal,
}

/// Folds a symbol's operations into a weighted-average-cost snapshot.
///
/// Operations must already be in ascending date order. A purchase adds
/// `price * shares + commission` to the running cost; a sale removes cost at
/// the average price of that instant and then adds its own commission back.
/// Derived fields stay at zero unless the final share count is positive.
pub fn accumulate<T: Tradable>(
    symbol: &str,
    operations: &[T],
) -> Result<CostBasisSummary, AccountingError> {
    let mut total_price = BigDecimal::zero();
    let mut total_shares = BigDecimal::zero();
    let mut commission = BigDecimal::zero();

    for operation in operations {
        match operation.kind() {
            OperationKind::Purchase => {
                total_price += operation.price() * operation.shares() + operation.commission();
                total_shares += operation.shares();
            }
            OperationKind::Sale => {
                if total_shares <= BigDecimal::zero() {
                    return Err(AccountingError::SaleWithoutHoldings {
                        symbol: symbol.to_string(),
                        date: operation.date(),
                        shares: operation.shares().clone(),
                    });
                }
                let average_cost = &total_price / &total_shares;
                total_price -= average_cost * operation.shares();
                total_price += operation.commission();
                total_shares -= operation.shares();
            }
        }
        commission += operation.commission();
    }

    let mut summary = CostBasisSummary {
        shares: total_shares,
        ..CostBasisSummary::default()
    };
    if summary.shares > BigDecimal::zero() {
        summary.commission = round2(&commission);
        summary.cost_basis = round2(&total_price);
        summary.average_price = round2(&(&summary.cost_basis / &summary.shares));
    }
    Ok(summary)
}
