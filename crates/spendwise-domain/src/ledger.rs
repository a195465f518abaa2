//! Wallet balance plus the expense records reserved against it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{ExpenseId, Identifiable};
use crate::record::ExpenseRecord;

/// Balance a fresh wallet starts with when nothing has been persisted.
pub const DEFAULT_BALANCE: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Point-in-time view of the wallet: balance and newest-first records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerState {
    pub balance: Decimal,
    pub records: Vec<ExpenseRecord>,
}

impl LedgerState {
    pub fn new(balance: Decimal, records: Vec<ExpenseRecord>) -> Self {
        Self { balance, records }
    }

    pub fn position(&self, id: &ExpenseId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    pub fn record(&self, id: &ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Sum of every amount currently reserved from the balance, clamped at
    /// the representable range.
    pub fn reserved(&self) -> Decimal {
        self.records
            .iter()
            .fold(Decimal::ZERO, |total, record| total.saturating_add(record.amount))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCE, Vec::new())
    }
}
