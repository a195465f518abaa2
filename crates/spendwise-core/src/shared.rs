//! Thread-safe handle for hosts that call the wallet from several threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use spendwise_domain::{ExpenseDraft, ExpenseId, ExpenseRecord, LedgerState};

use crate::{wallet::Wallet, CoreResult};

/// Serialises every mutation (and its persistence write) behind one lock so
/// no reader can observe a balance that disagrees with the record list.
#[derive(Debug, Clone)]
pub struct SharedWallet {
    inner: Arc<Mutex<Wallet>>,
}

impl SharedWallet {
    pub fn new(wallet: Wallet) -> Self {
        Self {
            inner: Arc::new(Mutex::new(wallet)),
        }
    }

    pub fn add_balance(&self, amount: Decimal) -> CoreResult<()> {
        self.lock().add_balance(amount)
    }

    pub fn add_expense(&self, draft: ExpenseDraft) -> CoreResult<ExpenseId> {
        self.lock().add_expense(draft)
    }

    pub fn edit_expense(&self, id: &ExpenseId, draft: ExpenseDraft) -> CoreResult<()> {
        self.lock().edit_expense(id, draft)
    }

    pub fn delete_expense(&self, id: &ExpenseId) -> CoreResult<Option<ExpenseRecord>> {
        self.lock().delete_expense(id)
    }

    pub fn snapshot(&self) -> LedgerState {
        self.lock().snapshot()
    }

    /// Runs a read-only closure against a consistent view of the wallet.
    pub fn read<T>(&self, f: impl FnOnce(&Wallet) -> T) -> T {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Wallet> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
