//! Session facade that pairs the ledger with its backing store.
//!
//! This is the only mutation surface offered to presentation layers. Every
//! committed operation is followed by a whole-value write of each key it
//! touched; storage failures are logged and never roll back the ledger.

use rust_decimal::Decimal;
use spendwise_domain::{ExpenseDraft, ExpenseId, ExpenseRecord, LedgerState, DEFAULT_BALANCE};

use crate::{
    aggregator::{Aggregator, CategoryShare, CategoryTotal, ExpenseSummary, MonthlyTotal},
    ledger::ExpenseLedger,
    storage::{self, KeyValueStore, LedgerChange},
    CoreResult,
};

pub struct Wallet {
    ledger: ExpenseLedger,
    store: Box<dyn KeyValueStore>,
}

impl Wallet {
    /// Restores the wallet from `store`, falling back per key to
    /// `default_balance` and an empty expense list.
    pub fn open(store: Box<dyn KeyValueStore>, default_balance: Decimal) -> Self {
        let state = storage::load_ledger_state(store.as_ref(), default_balance);
        for warning in storage::ledger_warnings(&state) {
            tracing::warn!("{warning}");
        }
        tracing::info!(
            balance = %state.balance,
            records = state.records.len(),
            reserved = %state.reserved(),
            "wallet opened"
        );
        Self {
            ledger: ExpenseLedger::from_state(state),
            store,
        }
    }

    pub fn open_default(store: Box<dyn KeyValueStore>) -> Self {
        Self::open(store, DEFAULT_BALANCE)
    }

    pub fn add_balance(&mut self, amount: Decimal) -> CoreResult<()> {
        self.ledger.add_balance(amount)?;
        self.persist(LedgerChange::BALANCE);
        Ok(())
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> CoreResult<ExpenseId> {
        let id = self.ledger.add_expense(draft)?;
        self.persist(LedgerChange::ALL);
        Ok(id)
    }

    pub fn edit_expense(&mut self, id: &ExpenseId, draft: ExpenseDraft) -> CoreResult<()> {
        self.ledger.edit_expense(id, draft)?;
        self.persist(LedgerChange::ALL);
        Ok(())
    }

    /// Deletes the expense if present; unknown ids leave state and storage untouched.
    pub fn delete_expense(&mut self, id: &ExpenseId) -> CoreResult<Option<ExpenseRecord>> {
        let removed = self.ledger.delete_expense(id)?;
        let change = if removed.is_some() {
            LedgerChange::ALL
        } else {
            LedgerChange::NONE
        };
        self.persist(change);
        Ok(removed)
    }

    pub fn balance(&self) -> Decimal {
        self.ledger.balance()
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        self.ledger.records()
    }

    pub fn record(&self, id: &ExpenseId) -> Option<&ExpenseRecord> {
        self.ledger.record(id)
    }

    pub fn snapshot(&self) -> LedgerState {
        self.ledger.snapshot()
    }

    pub fn summary(&self) -> ExpenseSummary {
        Aggregator::summary(self.records())
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        Aggregator::category_breakdown(self.records())
    }

    pub fn category_shares(&self) -> Vec<CategoryShare> {
        Aggregator::category_shares(self.records())
    }

    pub fn monthly_breakdown(&self) -> Vec<MonthlyTotal> {
        Aggregator::monthly_breakdown(self.records())
    }

    pub fn top_expenses(&self, n: usize) -> Vec<&ExpenseRecord> {
        Aggregator::top_expenses(self.records(), n)
    }

    fn persist(&self, change: LedgerChange) {
        if change.is_empty() {
            return;
        }
        storage::persist_ledger_state(self.store.as_ref(), self.ledger.state(), change);
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}
