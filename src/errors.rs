use axum::response::IntoResponse;
use reqwest::StatusCode;
use thiserror::Error;

use crate::services::cost_basis::AccountingError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(sqlx::Error),
    #[error("Malformed ledger record: {0}")]
    Ledger(String),
    #[error("Accounting error: {0}")]
    Accounting(AccountingError),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Accounting(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
            AppError::Ledger(_) | AppError::Db(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        AppError::Db(value)
    }
}

impl From<AccountingError> for AppError {
    fn from(value: AccountingError) -> Self {
        AppError::Accounting(value)
    }
}
