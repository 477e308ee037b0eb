use std::str::FromStr;

use rust_decimal::{Decimal, prelude::Zero};
use serde::{Deserialize, Deserializer, Serialize, de};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// Raw request, as received from a caller. Nothing is validated yet.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
}

/// JSON numbers arrive as `f64`. Values that `Decimal` cannot hold, or that
/// would silently round to zero, are rejected instead of being truncated.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    let amount = Decimal::from_str(&value.to_string())
        .map_err(|err| de::Error::custom(format!("amount {value} is out of range: {err}")))?;
    if amount.is_zero() && value != 0.0 {
        return Err(de::Error::custom(format!(
            "amount {value} is too small to be represented"
        )));
    }
    Ok(amount)
}

/// Validated request: `amount` is guaranteed to be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTransactionCommand {
    kind: TransactionKind,
    amount: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountCommandError {
    #[error("amount must be positive")]
    InvalidAmount { kind: TransactionKind },
}

impl RecordTransactionCommand {
    pub fn parse_command(request: TransactionRequest) -> Result<Self, AccountCommandError> {
        let TransactionRequest { kind, amount } = request;
        if amount > Decimal::zero() {
            Ok(Self { kind, amount })
        } else {
            Err(AccountCommandError::InvalidAmount { kind })
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
