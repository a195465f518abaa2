use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_domain::ExpenseCategory;

pub mod config;
pub mod expense;
pub mod report;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a valid amount", raw)))
}

pub(crate) fn parse_category(raw: &str) -> Result<ExpenseCategory, CommandError> {
    raw.parse::<ExpenseCategory>().map_err(|err| {
        let known: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.label()).collect();
        CommandError::InvalidArguments(format!("{}; expected one of: {}", err, known.join(", ")))
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date (expected YYYY-MM-DD)", raw))
    })
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
