//! Pure derivations over a read-only snapshot of expense records.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use spendwise_domain::{Amounted, ExpenseCategory, ExpenseRecord, YearMonth};

/// Number of records returned by the top-expenses view unless overridden.
pub const DEFAULT_TOP_EXPENSES: usize = 5;

/// Share of the total below which a category slice goes unlabelled on charts.
pub const DEFAULT_LABEL_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Decimal,
}

/// Category total plus its fraction of all spending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub total: Decimal,
    pub share: Decimal,
}

impl CategoryShare {
    /// Whether the slice is large enough to carry an on-chart label.
    pub fn is_labelled(&self, threshold: Decimal) -> bool {
        self.share >= threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Decimal,
    pub count: usize,
}

/// Header statistics for the expense list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
}

pub struct Aggregator;

impl Aggregator {
    /// Sum of all amounts. Totals past the representable range clamp at the
    /// bound instead of overflowing.
    pub fn total_expenses(records: &[ExpenseRecord]) -> Decimal {
        records
            .iter()
            .map(Amounted::amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sums amounts per category in first-seen order. Categories without
    /// records are omitted.
    pub fn category_breakdown(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for record in records {
            match totals
                .iter_mut()
                .find(|entry| entry.category == record.category)
            {
                Some(entry) => entry.total = entry.total.saturating_add(record.amount),
                None => totals.push(CategoryTotal {
                    category: record.category,
                    total: record.amount,
                }),
            }
        }
        totals
    }

    /// Full breakdown with each category's fraction of the total. Label
    /// suppression is left to the consumer via [`CategoryShare::is_labelled`].
    pub fn category_shares(records: &[ExpenseRecord]) -> Vec<CategoryShare> {
        let grand_total = Self::total_expenses(records);
        Self::category_breakdown(records)
            .into_iter()
            .map(|entry| CategoryShare {
                category: entry.category,
                total: entry.total,
                share: if grand_total.is_zero() {
                    Decimal::ZERO
                } else {
                    entry.total / grand_total
                },
            })
            .collect()
    }

    /// Per-month totals and counts, oldest month first.
    pub fn monthly_breakdown(records: &[ExpenseRecord]) -> Vec<MonthlyTotal> {
        let mut months: BTreeMap<YearMonth, (Decimal, usize)> = BTreeMap::new();
        for record in records {
            let entry = months
                .entry(YearMonth::from_date(record.date))
                .or_insert((Decimal::ZERO, 0));
            entry.0 = entry.0.saturating_add(record.amount);
            entry.1 += 1;
        }
        months
            .into_iter()
            .map(|(month, (total, count))| MonthlyTotal {
                month,
                total,
                count,
            })
            .collect()
    }

    /// The `n` largest expenses, descending. Equal amounts keep their
    /// original relative order.
    pub fn top_expenses(records: &[ExpenseRecord], n: usize) -> Vec<&ExpenseRecord> {
        let mut ranked: Vec<&ExpenseRecord> = records.iter().collect();
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranked.truncate(n);
        ranked
    }

    pub fn average_expense(records: &[ExpenseRecord]) -> Decimal {
        if records.is_empty() {
            return Decimal::ZERO;
        }
        Self::total_expenses(records) / Decimal::from(records.len())
    }

    pub fn summary(records: &[ExpenseRecord]) -> ExpenseSummary {
        ExpenseSummary {
            total: Self::total_expenses(records),
            count: records.len(),
            average: Self::average_expense(records),
        }
    }
}
