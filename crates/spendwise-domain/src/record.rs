//! Expense records and the draft payload used to create or replace them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::ExpenseCategory;
use crate::common::*;

/// A single expense transaction held by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub title: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            title: draft.title,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
        }
    }

    /// Overwrites every mutable field while keeping the identifier.
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.title = draft.title;
        self.amount = draft.amount;
        self.category = draft.category;
        self.date = draft.date;
    }
}

impl Identifiable for ExpenseRecord {
    fn id(&self) -> &ExpenseId {
        &self.id
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.title, self.category, self.date)
    }
}

/// Caller-supplied expense fields, used for both creation and edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            category,
            date,
        }
    }
}

impl From<&ExpenseRecord> for ExpenseDraft {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            title: record.title.clone(),
            amount: record.amount,
            category: record.category,
            date: record.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn apply_keeps_identifier() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let draft = ExpenseDraft::new("Lunch", dec!(200), ExpenseCategory::Food, date);
        let mut record = ExpenseRecord::from_draft(ExpenseId::from("a1"), draft);

        let later = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        record.apply(ExpenseDraft::new(
            "Dinner",
            dec!(350),
            ExpenseCategory::Entertainment,
            later,
        ));

        assert_eq!(record.id.as_str(), "a1");
        assert_eq!(record.title, "Dinner");
        assert_eq!(record.amount, dec!(350));
        assert_eq!(record.date, later);
    }

    #[test]
    fn record_json_uses_flat_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let record = ExpenseRecord::from_draft(
            ExpenseId::from("42"),
            ExpenseDraft::new("Lunch", dec!(200), ExpenseCategory::Food, date),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "42");
        assert_eq!(value["category"], "Food");
        assert_eq!(value["date"], "2024-01-10");
        assert_eq!(value["amount"].as_f64(), Some(200.0));
    }
}
