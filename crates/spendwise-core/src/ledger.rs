//! The four legal state transitions over wallet balance and expense records.
//!
//! Every operation either commits both halves of the state or leaves the
//! ledger untouched. Between operations the balance always equals the opening
//! balance plus every top-up minus the amounts of the records still held.

use rust_decimal::Decimal;
use spendwise_domain::{ExpenseDraft, ExpenseId, ExpenseRecord, LedgerState};

use crate::{CoreError, CoreResult};

/// Owns the authoritative ledger state and exposes its only mutation surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseLedger {
    state: LedgerState,
}

impl ExpenseLedger {
    /// Restores a ledger from previously persisted values. No validation is
    /// performed beyond type shape.
    pub fn new(balance: Decimal, records: Vec<ExpenseRecord>) -> Self {
        Self::from_state(LedgerState::new(balance, records))
    }

    pub fn from_state(state: LedgerState) -> Self {
        Self { state }
    }

    pub fn balance(&self) -> Decimal {
        self.state.balance
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.state.records
    }

    pub fn record(&self, id: &ExpenseId) -> Option<&ExpenseRecord> {
        self.state.record(id)
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn snapshot(&self) -> LedgerState {
        self.state.clone()
    }

    /// Tops up the wallet.
    pub fn add_balance(&mut self, amount: Decimal) -> CoreResult<()> {
        ensure_positive(amount)?;
        self.state.balance = checked(self.state.balance.checked_add(amount))?;
        tracing::debug!(%amount, balance = %self.state.balance, "balance added");
        Ok(())
    }

    /// Records a new expense at the head of the list and reserves its amount.
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> CoreResult<ExpenseId> {
        validate_draft(&draft)?;
        if draft.amount > self.state.balance {
            return Err(CoreError::InsufficientBalance {
                requested: draft.amount,
                available: self.state.balance,
            });
        }

        let amount = draft.amount;
        let balance = checked(self.state.balance.checked_sub(amount))?;

        let id = self.fresh_id();
        self.state
            .records
            .insert(0, ExpenseRecord::from_draft(id.clone(), draft));
        self.state.balance = balance;
        tracing::debug!(%id, %amount, balance = %self.state.balance, "expense added");
        Ok(id)
    }

    /// Replaces the expense in place and shifts the balance by the amount delta.
    ///
    /// The delta is applied without a sufficiency check, so growing an expense
    /// past the available balance drives the balance negative.
    pub fn edit_expense(&mut self, id: &ExpenseId, draft: ExpenseDraft) -> CoreResult<()> {
        let index = self
            .state
            .position(id)
            .ok_or_else(|| CoreError::NotFound(id.clone()))?;
        validate_draft(&draft)?;

        let delta = checked(draft.amount.checked_sub(self.state.records[index].amount))?;
        let balance = checked(self.state.balance.checked_sub(delta))?;

        self.state.records[index].apply(draft);
        self.state.balance = balance;
        tracing::debug!(%id, %delta, balance = %self.state.balance, "expense edited");
        Ok(())
    }

    /// Removes the expense and releases its amount back to the balance.
    ///
    /// Unknown ids are a silent no-op and return `Ok(None)`.
    pub fn delete_expense(&mut self, id: &ExpenseId) -> CoreResult<Option<ExpenseRecord>> {
        let Some(index) = self.state.position(id) else {
            return Ok(None);
        };
        let balance = checked(
            self.state
                .balance
                .checked_add(self.state.records[index].amount),
        )?;

        let removed = self.state.records.remove(index);
        self.state.balance = balance;
        tracing::debug!(%id, amount = %removed.amount, balance = %self.state.balance, "expense deleted");
        Ok(Some(removed))
    }

    fn fresh_id(&self) -> ExpenseId {
        let mut id = ExpenseId::generate();
        while self.state.position(&id).is_some() {
            id = ExpenseId::generate();
        }
        id
    }
}

impl From<LedgerState> for ExpenseLedger {
    fn from(state: LedgerState) -> Self {
        Self::from_state(state)
    }
}

/// Balance arithmetic is computed before any field is touched; `None` means
/// the result left the representable range.
fn checked(result: Option<Decimal>) -> CoreResult<Decimal> {
    result.ok_or(CoreError::BalanceOverflow)
}

fn ensure_positive(amount: Decimal) -> CoreResult<()> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::InvalidAmount(amount));
    }
    Ok(())
}

fn validate_draft(draft: &ExpenseDraft) -> CoreResult<()> {
    ensure_positive(draft.amount)?;
    if draft.title.trim().is_empty() {
        return Err(CoreError::EmptyTitle);
    }
    Ok(())
}
