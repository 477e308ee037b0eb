use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{AccountError, Transaction},
    command::{AccountCommandError, TransactionRequest},
};

pub mod in_memory_processor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionProcessError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Flat view over [`TransactionProcessError`], for callers that only need to
/// know which business rule rejected the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidAmount,
    InsufficientFunds,
    BalanceOverflow,
}

impl TransactionProcessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CommandErr(AccountCommandError::InvalidAmount { .. }) => ErrorKind::InvalidAmount,
            Self::AccountErr(AccountError::InsufficientFunds { .. }) => {
                ErrorKind::InsufficientFunds
            }
            Self::AccountErr(AccountError::BalanceOverflow { .. }) => ErrorKind::BalanceOverflow,
        }
    }
}

pub trait TransactionProcessor: Send + Sync {
    /// Validates and records a transaction. On error nothing is changed.
    fn record_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<Transaction, TransactionProcessError>;

    /// Snapshot of the full history, in acceptance order.
    fn transactions(&self) -> Vec<Transaction>;

    fn balance(&self) -> Decimal;
}
