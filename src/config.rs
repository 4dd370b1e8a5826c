use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::external::finance_api::FinanceApiConfig;

const DEFAULT_PORT: u16 = 8889;
const DEFAULT_FINANCE_API_URL: &str = "https://mfinance.com.br/api/v1";
const DEFAULT_FINANCE_API_TIMEOUT_SECS: u64 = 3;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub finance_api_url: String,
    pub finance_api_timeout_secs: u64,
    pub finance_api_connect_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source; `from_env` passes
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            finance_api_url: lookup("FINANCE_API_URL")
                .unwrap_or_else(|| DEFAULT_FINANCE_API_URL.to_string()),
            finance_api_timeout_secs: parse_or(
                &lookup,
                "FINANCE_API_TIMEOUT_SECS",
                DEFAULT_FINANCE_API_TIMEOUT_SECS,
            )?,
            finance_api_connect_timeout_secs: parse_or(
                &lookup,
                "FINANCE_API_CONNECT_TIMEOUT_SECS",
                DEFAULT_FINANCE_API_TIMEOUT_SECS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        if self.finance_api_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "FINANCE_API_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        if self.finance_api_connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "FINANCE_API_CONNECT_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        if url::Url::parse(&self.finance_api_url).is_err() {
            return Err(ConfigError::Invalid {
                var: "FINANCE_API_URL",
                value: self.finance_api_url.clone(),
            });
        }
        Ok(())
    }

    pub fn finance_api(&self) -> FinanceApiConfig {
        FinanceApiConfig {
            base_url: self.finance_api_url.clone(),
            timeout: Duration::from_secs(self.finance_api_timeout_secs),
            connect_timeout: Duration::from_secs(self.finance_api_connect_timeout_secs),
        }
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
