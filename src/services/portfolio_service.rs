use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::external::market_data_provider::MarketDataProvider;
use crate::models::{ItemType, Operation, Portfolio, PortfolioRecord, Position};
use crate::services::cost_basis::round2;
use crate::services::enrichment_service::{self, SymbolKey};
use crate::services::position_service;
use crate::store::LedgerStore;

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Exclusive upper bound for operations counted in `year`: midnight UTC on
/// January 1st of the following year.
pub fn year_cutoff(year: i32) -> Result<DateTime<Utc>, AppError> {
    year.checked_add(1)
        .and_then(|next| Utc.with_ymd_and_hms(next, 1, 1, 0, 0, 0).single())
        .ok_or_else(|| AppError::Validation(format!("Year {} is out of range", year)))
}

/// Sums position cost basis and gain into portfolio totals.
///
/// An empty portfolio keeps zeroed totals and no division is attempted.
pub fn aggregate(portfolio: &mut Portfolio) {
    portfolio.cost_basis = BigDecimal::zero();
    portfolio.gain = BigDecimal::zero();
    portfolio.overall_return = BigDecimal::zero();

    if portfolio.items.is_empty() {
        return;
    }

    let cost_basis = portfolio
        .items
        .values()
        .fold(BigDecimal::zero(), |acc, position| acc + &position.cost_basis);
    let gain = portfolio
        .items
        .values()
        .fold(BigDecimal::zero(), |acc, position| acc + &position.gain);

    portfolio.cost_basis = round2(&cost_basis);
    portfolio.gain = round2(&gain);
    portfolio.overall_return =
        position_service::overall_return(&portfolio.gain, &portfolio.cost_basis);
}

// Positions are keyed by symbol. A symbol already present under another item
// type is keyed "{itemType}/{symbol}" instead so it still counts in the totals.
fn insert_position(portfolio: &mut Portfolio, position: Position) {
    let key = if portfolio.items.contains_key(&position.symbol) {
        let qualified = format!("{}/{}", position.item_type, position.symbol);
        warn!(
            "Symbol {} appears under more than one item type in portfolio {}; keyed as {}",
            position.symbol, portfolio.id, qualified
        );
        qualified
    } else {
        position.symbol.clone()
    };
    portfolio.items.insert(key, position);
}

async fn discover_symbols(
    store: &dyn LedgerStore,
    portfolio_id: &str,
) -> Result<Vec<SymbolKey>, AppError> {
    let mut keys = Vec::new();
    for item_type in store.distinct_item_types(portfolio_id).await? {
        for symbol in store.distinct_symbols(portfolio_id, item_type).await? {
            keys.push(SymbolKey::new(item_type, symbol));
        }
    }
    Ok(keys)
}

async fn load_ledgers(
    store: &dyn LedgerStore,
    portfolio_id: &str,
    keys: &[SymbolKey],
    before: DateTime<Utc>,
) -> Result<Vec<Vec<Operation>>, AppError> {
    let mut ledgers = Vec::with_capacity(keys.len());
    for key in keys {
        ledgers.push(
            store
                .operations_for_symbol(portfolio_id, &key.symbol, key.item_type, before)
                .await?,
        );
    }
    Ok(ledgers)
}

async fn compute_record(
    store: &dyn LedgerStore,
    provider: &dyn MarketDataProvider,
    record: &PortfolioRecord,
    year: i32,
) -> Result<Portfolio, AppError> {
    let before = year_cutoff(year)?;
    let keys = discover_symbols(store, &record.id).await?;
    debug!("Portfolio {} has {} symbols", record.id, keys.len());

    // Ledger reads overlap the market fan-out; a ledger failure still aborts.
    let (ledgers, enrichment) = tokio::join!(
        load_ledgers(store, &record.id, &keys, before),
        enrichment_service::fetch_all(provider, &keys),
    );
    let ledgers = ledgers?;

    let mut portfolio = Portfolio::from(record);
    for (key, operations) in keys.iter().zip(ledgers) {
        if operations.is_empty() {
            debug!("No {} operations for {} up to {}", key.item_type, key.symbol, year);
            continue;
        }
        let position = position_service::build(
            &key.symbol,
            key.item_type,
            operations,
            enrichment.quote(key),
            enrichment.dividends(key),
        )?;
        insert_position(&mut portfolio, position);
    }
    aggregate(&mut portfolio);

    if !enrichment.failed().is_empty() {
        info!(
            "Portfolio {} computed with {} symbols missing market data",
            record.id,
            enrichment.failed().len()
        );
    }
    Ok(portfolio)
}

/// Builds the full position snapshot of one portfolio for `year`.
pub async fn compute(
    store: &dyn LedgerStore,
    provider: &dyn MarketDataProvider,
    portfolio_id: &str,
    year: i32,
) -> Result<Portfolio, AppError> {
    let record = store
        .fetch_portfolio(portfolio_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio {} not found", portfolio_id)))?;
    compute_record(store, provider, &record, year).await
}

/// Builds every portfolio for `year`. A portfolio whose ledger cannot be read
/// or folded is logged and left out; the others are still returned.
pub async fn compute_all(
    store: &dyn LedgerStore,
    provider: &dyn MarketDataProvider,
    year: i32,
) -> Result<Vec<Portfolio>, AppError> {
    let records = store.fetch_portfolios().await?;
    let mut portfolios = Vec::with_capacity(records.len());
    for record in &records {
        match compute_record(store, provider, record, year).await {
            Ok(portfolio) => portfolios.push(portfolio),
            Err(e) => error!("Error on compute portfolio {}: {}", record.id, e),
        }
    }
    Ok(portfolios)
}

/// Builds a single position of a portfolio for `year`.
pub async fn compute_position(
    store: &dyn LedgerStore,
    provider: &dyn MarketDataProvider,
    portfolio_id: &str,
    item_type: ItemType,
    symbol: &str,
    year: i32,
) -> Result<Position, AppError> {
    if store.fetch_portfolio(portfolio_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Portfolio {} not found", portfolio_id)));
    }
    let before = year_cutoff(year)?;
    let key = SymbolKey::new(item_type, symbol);

    let (operations, enrichment) = tokio::join!(
        store.operations_for_symbol(portfolio_id, symbol, item_type, before),
        enrichment_service::fetch_all(provider, std::slice::from_ref(&key)),
    );
    let operations = operations?;
    if operations.is_empty() {
        return Err(AppError::NotFound(format!(
            "No {} operations for {} in portfolio {}",
            item_type, symbol, portfolio_id
        )));
    }

    Ok(position_service::build(
        symbol,
        item_type,
        operations,
        enrichment.quote(&key),
        enrichment.dividends(&key),
    )?)
}
