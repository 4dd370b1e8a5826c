pub mod decimal;
mod dividend;
mod item_type;
mod operation;
mod portfolio;
mod position;

pub use dividend::{DividendEvent, DividendHistory};
pub use item_type::ItemType;
pub use operation::{FixedIncomeTrade, Operation, OperationKind, OperationRecord, Tradable, Trade};
pub use portfolio::{Portfolio, PortfolioRecord};
pub use position::{MarketSnapshot, Position};
