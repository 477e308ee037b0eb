use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::command::{RecordTransactionCommand, TransactionKind};

/// Sequential, 1-based transaction identifier. Rendered as `txn_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(u64);

impl TransactionId {
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn seq(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn_{}", self.0)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepted balance change. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
}

#[derive(Debug, Clone)]
pub struct AccountEvent {
    transaction_id: TransactionId,
    amount: Decimal,
    kind: AccountEventKind,
    created_at: DateTime<Utc>,
    /// Balance once the event is applied.
    balance: Decimal,
}

impl AccountEvent {
    pub fn transaction(&self) -> Transaction {
        Transaction {
            id: self.transaction_id,
            kind: match self.kind {
                AccountEventKind::Deposited => TransactionKind::Deposit,
                AccountEventKind::Withdrawn => TransactionKind::Withdrawal,
            },
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("insufficient funds")]
    InsufficientFunds { requested: Decimal, available: Decimal },
    #[error("balance limit exceeded")]
    BalanceOverflow { requested: Decimal, balance: Decimal },
}

/// Balance plus the history it is derived from.
#[derive(Debug, Default)]
pub struct Account {
    balance: Decimal,
    history: Vec<Transaction>,
}

impl Account {
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    fn next_transaction_id(&self) -> TransactionId {
        TransactionId::new(self.history.len() as u64 + 1)
    }

    /// Timestamps never go backwards, even if the wall clock does.
    fn acceptance_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.history.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        }
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        debug_assert_eq!(event.transaction_id, self.next_transaction_id());
        self.balance = event.balance;
        self.history.push(event.transaction());
    }

    pub fn handle_new_transaction(
        &self,
        command: RecordTransactionCommand,
        now: DateTime<Utc>,
    ) -> Result<AccountEvent, AccountError> {
        let amount = command.amount();
        let (kind, balance) = match command.kind() {
            TransactionKind::Deposit => {
                let balance = self.balance.checked_add(amount).ok_or(
                    AccountError::BalanceOverflow {
                        requested: amount,
                        balance: self.balance,
                    },
                )?;
                (AccountEventKind::Deposited, balance)
            }
            TransactionKind::Withdrawal => {
                if self.balance < amount {
                    return Err(AccountError::InsufficientFunds {
                        requested: amount,
                        available: self.balance,
                    });
                }
                (AccountEventKind::Withdrawn, self.balance - amount)
            }
        };
        Ok(AccountEvent {
            transaction_id: self.next_transaction_id(),
            amount,
            kind,
            created_at: self.acceptance_time(now),
            balance,
        })
    }
}
