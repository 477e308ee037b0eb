use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    account::{Account, Transaction},
    command::{RecordTransactionCommand, TransactionRequest},
};

use super::{TransactionProcessError, TransactionProcessor};

/// Keeps the whole ledger behind a single lock. Writers hold it for the full
/// check-then-apply sequence, readers share it.
#[derive(Debug, Default)]
pub struct InMemoryTransactionProcessor {
    account: RwLock<Account>,
}

impl TransactionProcessor for InMemoryTransactionProcessor {
    fn record_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<Transaction, TransactionProcessError> {
        let cmd = RecordTransactionCommand::parse_command(request).inspect_err(|err| {
            debug!(kind = ?request.kind, amount = %request.amount, "rejected: {err}");
        })?;
        let mut acc = self.account.write();
        let evt = acc
            .handle_new_transaction(cmd, Utc::now())
            .inspect_err(|err| {
                debug!(kind = ?cmd.kind(), amount = %cmd.amount(), "rejected: {err}");
            })?;
        acc.apply(&evt);
        drop(acc);

        let txn = evt.transaction();
        debug!(id = %txn.id, kind = ?txn.kind, amount = %txn.amount, "transaction recorded");
        Ok(txn)
    }

    fn transactions(&self) -> Vec<Transaction> {
        self.account.read().history().to_vec()
    }

    fn balance(&self) -> Decimal {
        self.account.read().balance()
    }
}
