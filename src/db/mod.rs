pub mod operation_queries;
pub mod portfolio_queries;
