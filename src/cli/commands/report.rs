use spendwise_core::format::format_share;

use crate::cli::commands::{format_date, usage_error};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

const TOP_USAGE: &str = "top [count]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "categories",
            "Show spending per category",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new("trends", "Show spending per month", "trends", cmd_trends),
        CommandEntry::new("top", "Show the largest expenses", TOP_USAGE, cmd_top),
        CommandEntry::new("stats", "Show total, count, and average spend", "stats", cmd_stats),
    ]
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let shares = context.wallet.category_shares();
    if shares.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }

    output::section("Spending by category");
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Total"),
        TableColumn::right("Share"),
    ]);
    for share in shares {
        let label = if share.is_labelled(context.config.label_threshold) {
            format_share(share.share)
        } else {
            String::new()
        };
        table.push_row(vec![
            share.category.to_string(),
            context.money(share.total),
            label,
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

fn cmd_trends(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let months = context.wallet.monthly_breakdown();
    if months.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }

    output::section("Monthly spending");
    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Total"),
        TableColumn::right("Expenses"),
    ]);
    for month in months {
        table.push_row(vec![
            month.month.label(),
            context.money(month.total),
            month.count.to_string(),
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

fn cmd_top(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let count = match args {
        [] => context.config.top_expenses,
        [raw] => raw
            .parse::<usize>()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{}` is not a positive count", raw))
            })?,
        _ => return Err(usage_error(TOP_USAGE)),
    };

    let top = context.wallet.top_expenses(count);
    if top.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }

    output::section(format!("Top {} expenses", top.len()));
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Title"),
        TableColumn::left("Category"),
        TableColumn::left("Date"),
        TableColumn::right("Amount"),
    ]);
    for (rank, record) in top.iter().enumerate() {
        table.push_row(vec![
            (rank + 1).to_string(),
            record.title.clone(),
            record.category.to_string(),
            format_date(record.date),
            context.money(record.amount),
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.wallet.summary();
    output::section("Spending summary");
    output::two_column(&[
        ("Total spent", context.money(summary.total)),
        ("Expenses", summary.count.to_string()),
        ("Average", context.money(summary.average)),
        ("Balance", context.money(context.wallet.balance())),
    ]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use spendwise_config::Config;
    use spendwise_core::{MemoryStore, SystemClock, Wallet};

    use crate::cli::core::{CliMode, CommandError, ShellContext};
    use crate::cli::shell::handle_line;

    fn context() -> ShellContext {
        let wallet = Wallet::open(Box::new(MemoryStore::new()), dec!(5000));
        ShellContext::with_parts(
            CliMode::Script,
            wallet,
            Config::default(),
            None,
            Box::new(SystemClock),
        )
    }

    #[test]
    fn reports_run_on_an_empty_wallet() {
        let mut ctx = context();
        for line in ["categories", "trends", "top", "stats"] {
            assert!(handle_line(&mut ctx, line).is_ok(), "{line} failed");
        }
    }

    #[test]
    fn top_rejects_a_zero_count() {
        let mut ctx = context();
        handle_line(&mut ctx, "add Lunch 200 food 2024-03-01").unwrap();
        assert!(matches!(
            handle_line(&mut ctx, "top 0"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(handle_line(&mut ctx, "top 3").is_ok());
    }
}
