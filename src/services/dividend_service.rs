use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use crate::models::{DividendEvent, ItemType, Tradable};
use crate::services::cost_basis::round2;

// Date an event is compared against for the given item type. Item types with
// no dividend feed never qualify.
fn reference_date(item_type: ItemType, event: &DividendEvent) -> Option<DateTime<Utc>> {
    match item_type {
        ItemType::Stock => event.date,
        ItemType::Fii => event.declared_date,
        _ => None,
    }
}

/// Accrued dividend income for a symbol's operations.
///
/// For each operation, every event whose reference date is on or after the
/// operation date contributes `value * operation.shares`. Purchases and
/// sales are not distinguished. The running total is ceiling-rounded to two
/// places after each operation.
///
/// The candidate events are the same for every operation. With operations in
/// ascending date order, an event that fails to qualify for one operation
/// cannot qualify for any later one.
pub fn accrued_dividends<T: Tradable>(operations: &[T], events: &[DividendEvent]) -> BigDecimal {
    let mut total = BigDecimal::zero();

    for operation in operations {
        let operation_date = operation.date();
        for event in events {
            let Some(reference) = reference_date(operation.item_type(), event) else {
                continue;
            };
            if reference >= operation_date {
                total += &event.value * operation.shares();
            }
        }
        total = round2(&total);
    }

    round2(&total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Operation, OperationKind, Trade};
    use chrono::TimeZone;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn day(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, m, d, 0, 0, 0).unwrap()
    }

    fn trade(date: DateTime<Utc>, kind: OperationKind, shares: &str) -> Trade {
        Trade {
            id: Uuid::new_v4(),
            symbol: "ITSA4".to_string(),
            date,
            price: dec("10"),
            shares: dec(shares),
            commission: BigDecimal::zero(),
            kind,
            broker_slug: "clear".to_string(),
            portfolio_id: "default".to_string(),
        }
    }

    fn event(date: Option<DateTime<Utc>>, declared: Option<DateTime<Utc>>, value: &str) -> DividendEvent {
        DividendEvent {
            date,
            declared_date: declared,
            pay_date: None,
            kind: None,
            value: dec(value),
        }
    }

    // Variant where candidates shrink to the events that
    // matched the previous operation.
    fn narrowing_fold(operations: &[Operation], events: &[DividendEvent]) -> BigDecimal {
        let mut candidates: Vec<DividendEvent> = events.to_vec();
        let mut total = BigDecimal::zero();
        for operation in operations {
            let mut kept = Vec::new();
            for event in &candidates {
                let Some(reference) = reference_date(operation.item_type(), event) else {
                    continue;
                };
                if reference >= operation.date() {
                    total += &event.value * operation.shares();
                    kept.push(event.clone());
                }
            }
            candidates = kept;
            total = round2(&total);
        }
        round2(&total)
    }

    #[test]
    fn test_stock_events_match_on_date() {
        let ops = vec![Operation::Stock(trade(day(3, 1), OperationKind::Purchase, "100"))];
        let events = vec![
            event(Some(day(2, 15)), Some(day(3, 5)), "1.00"),
            event(Some(day(3, 1)), None, "0.25"),
            event(Some(day(6, 30)), None, "0.30"),
        ];

        assert_eq!(accrued_dividends(&ops, &events), dec("55.00"));
    }

    #[test]
    fn test_fii_events_match_on_declared_date() {
        let ops = vec![Operation::Fii(trade(day(3, 1), OperationKind::Purchase, "10"))];
        let events = vec![
            event(Some(day(3, 10)), Some(day(2, 27)), "0.80"),
            event(Some(day(1, 10)), Some(day(3, 31)), "0.78"),
            event(Some(day(4, 10)), None, "5.00"),
        ];

        assert_eq!(accrued_dividends(&ops, &events), dec("7.80"));
    }

    #[test]
    fn test_other_item_types_never_accrue() {
        let ops = vec![Operation::StockFund(trade(day(3, 1), OperationKind::Purchase, "10"))];
        let events = vec![event(Some(day(6, 1)), Some(day(6, 1)), "1.00")];

        assert!(accrued_dividends(&ops, &events).is_zero());
    }

    #[test]
    fn test_sales_accrue_like_purchases() {
        let ops = vec![
            Operation::Stock(trade(day(1, 5), OperationKind::Purchase, "100")),
            Operation::Stock(trade(day(2, 5), OperationKind::Sale, "40")),
        ];
        let events = vec![event(Some(day(3, 1)), None, "0.10")];

        // 100 * 0.10 + 40 * 0.10
        assert_eq!(accrued_dividends(&ops, &events), dec("14.00"));
    }

    #[test]
    fn test_running_total_is_rounded_after_each_operation() {
        let ops = vec![
            Operation::Stock(trade(day(1, 5), OperationKind::Purchase, "1")),
            Operation::Stock(trade(day(1, 6), OperationKind::Purchase, "1")),
        ];
        let events = vec![event(Some(day(3, 1)), None, "0.333")];

        // 0.333 -> 0.34, then 0.34 + 0.333 = 0.673 -> 0.68
        assert_eq!(accrued_dividends(&ops, &events), dec("0.68"));
    }

    #[test]
    fn test_constant_candidates_match_narrowing_for_sorted_ledger() {
        let ops = vec![
            Operation::Stock(trade(day(1, 5), OperationKind::Purchase, "100")),
            Operation::Stock(trade(day(3, 2), OperationKind::Purchase, "50")),
            Operation::Stock(trade(day(5, 20), OperationKind::Sale, "30")),
            Operation::Stock(trade(day(9, 1), OperationKind::Purchase, "10")),
        ];
        let events = vec![
            event(Some(day(1, 1)), None, "0.50"),
            event(None, Some(day(2, 1)), "9.99"),
            event(Some(day(2, 28)), None, "0.12"),
            event(Some(day(3, 2)), None, "0.07"),
            event(Some(day(6, 30)), None, "0.21"),
            event(Some(day(12, 15)), None, "0.33"),
        ];

        assert_eq!(accrued_dividends(&ops, &events), narrowing_fold(&ops, &events));
    }

    #[test]
    fn test_no_operations_accrue_nothing() {
        let events = vec![event(Some(day(3, 1)), None, "1.00")];
        assert!(accrued_dividends::<Operation>(&[], &events).is_zero());
    }
}
