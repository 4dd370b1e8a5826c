use bigdecimal::{BigDecimal, Zero};

use crate::models::{DividendEvent, ItemType, MarketSnapshot, Operation, Position, Tradable};
use crate::services::cost_basis::{self, round2, AccountingError};
use crate::services::dividend_service;

/// Builds a position from its ledger and whatever market data was fetched.
pub fn build(
    symbol: &str,
    item_type: ItemType,
    operations: Vec<Operation>,
    market: MarketSnapshot,
    dividend_events: Vec<DividendEvent>,
) -> Result<Position, AccountingError> {
    let mut position = Position::new(symbol, item_type);
    position.operations = operations;
    position.market = market;
    position.dividend_events = dividend_events;
    recalculate(&mut position)?;
    Ok(position)
}

/// Recomputes every derived field of `position` from its inputs.
///
/// Prior computed values are discarded first, so calling this repeatedly on
/// the same inputs always yields the same position. Same-date operations keep
/// their input order.
pub fn recalculate(position: &mut Position) -> Result<(), AccountingError> {
    position.operations.sort_by_key(|operation| operation.date());

    position.shares = BigDecimal::zero();
    position.average_price = BigDecimal::zero();
    position.cost_basis = BigDecimal::zero();
    position.commission = BigDecimal::zero();
    position.gain = BigDecimal::zero();
    position.overall_return = BigDecimal::zero();

    let summary = cost_basis::accumulate(&position.symbol, &position.operations)?;
    position.dividends =
        dividend_service::accrued_dividends(&position.operations, &position.dividend_events);

    position.shares = summary.shares;
    if position.shares > BigDecimal::zero() {
        position.commission = summary.commission;
        position.cost_basis = summary.cost_basis;
        position.average_price = summary.average_price;

        if position.item_type.reports_gain() {
            let gain = &position.shares * &position.market.last_price - &position.cost_basis;
            position.overall_return = overall_return(&gain, &position.cost_basis);
            position.gain = round2(&gain);
        }
    }
    Ok(())
}

/// `gain * 100 / cost_basis`, ceiling-rounded. A zero cost basis yields zero.
pub fn overall_return(gain: &BigDecimal, cost_basis: &BigDecimal) -> BigDecimal {
    if cost_basis.is_zero() {
        return BigDecimal::zero();
    }
    round2(&(gain * &BigDecimal::from(100) / cost_basis))
}
