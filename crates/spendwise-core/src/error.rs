use rust_decimal::Decimal;
use spendwise_domain::ExpenseId;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(Decimal),
    #[error("Insufficient wallet balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
    #[error("Expense title must not be empty")]
    EmptyTitle,
    #[error("Amount out of range: the wallet balance would overflow")]
    BalanceOverflow,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
