pub mod finance_api;
pub mod market_data_provider;
