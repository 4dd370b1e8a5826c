pub mod cost_basis;
pub mod dividend_service;
pub mod enrichment_service;
pub mod portfolio_service;
pub mod position_service;
