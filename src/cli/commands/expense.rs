use spendwise_domain::{Displayable, ExpenseDraft, ExpenseRecord};

use crate::cli::commands::{format_date, parse_amount, parse_category, parse_date, usage_error};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

const TOPUP_USAGE: &str = "topup <amount>";
const ADD_USAGE: &str = "add <title> <amount> <category> [YYYY-MM-DD]";
const EDIT_USAGE: &str =
    "edit <id|#> [--title <text>] [--amount <n>] [--category <name>] [--date <YYYY-MM-DD>]";
const DELETE_USAGE: &str = "delete <id|#>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("balance", "Show the wallet balance", "balance", cmd_balance),
        CommandEntry::new("topup", "Add funds to the wallet", TOPUP_USAGE, cmd_topup)
            .with_aliases(&["deposit"]),
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change an existing expense", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Remove an expense and refund it", DELETE_USAGE, cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new("list", "List expenses, newest first", "list", cmd_list)
            .with_aliases(&["ls"]),
    ]
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.wallet.summary();
    output::two_column(&[
        ("Balance", context.money(context.wallet.balance())),
        ("Spent", context.money(summary.total)),
        ("Expenses", summary.count.to_string()),
    ]);
    Ok(())
}

fn cmd_topup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(TOPUP_USAGE));
    };
    let amount = parse_amount(raw)?;
    context.wallet.add_balance(amount)?;
    output::success(format!(
        "Added {}. Balance is now {}.",
        context.money(amount),
        context.money(context.wallet.balance())
    ));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !(3..=4).contains(&args.len()) {
        return Err(usage_error(ADD_USAGE));
    }
    let amount = parse_amount(args[1])?;
    let category = parse_category(args[2])?;
    let date = match args.get(3) {
        Some(raw) => parse_date(raw)?,
        None => context.today(),
    };

    let draft = ExpenseDraft::new(args[0], amount, category, date);
    let id = context.wallet.add_expense(draft)?;
    output::success(format!(
        "Recorded {} for `{}` ({}).",
        context.money(amount),
        args[0].trim(),
        id
    ));
    output::hint(format!(
        "Balance is now {}.",
        context.money(context.wallet.balance())
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((target, flags)) = args.split_first() else {
        return Err(usage_error(EDIT_USAGE));
    };
    if flags.is_empty() || flags.len() % 2 != 0 {
        return Err(usage_error(EDIT_USAGE));
    }

    let (id, mut draft) = {
        let record = find_record(context, target)?;
        (record.id.clone(), ExpenseDraft::from(record))
    };

    for pair in flags.chunks(2) {
        let value = pair[1];
        match pair[0].to_ascii_lowercase().as_str() {
            "--title" => draft.title = value.to_string(),
            "--amount" => draft.amount = parse_amount(value)?,
            "--category" => draft.category = parse_category(value)?,
            "--date" => draft.date = parse_date(value)?,
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{}`",
                    other
                )))
            }
        }
    }

    context.wallet.edit_expense(&id, draft)?;
    output::success(format!("Updated expense {}.", id));
    output::hint(format!(
        "Balance is now {}.",
        context.money(context.wallet.balance())
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [target] = args else {
        return Err(usage_error(DELETE_USAGE));
    };
    let Some(id) = context.resolve_expense(target).map(|record| record.id.clone()) else {
        output::warning(format!("No expense matches `{}`; nothing deleted.", target));
        return Ok(());
    };

    if let Some(removed) = context.wallet.delete_expense(&id)? {
        output::success(format!(
            "Deleted {} and refunded {}. Balance is now {}.",
            removed.display_label(),
            context.money(removed.amount),
            context.money(context.wallet.balance())
        ));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records = context.wallet.records();
    if records.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::left("Title"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Id"),
    ]);
    for (index, record) in records.iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            format_date(record.date),
            record.title.clone(),
            record.category.to_string(),
            context.money(record.amount),
            record.id.to_string(),
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

fn find_record<'a>(
    context: &'a ShellContext,
    target: &str,
) -> Result<&'a ExpenseRecord, CommandError> {
    context
        .resolve_expense(target)
        .ok_or_else(|| CommandError::InvalidArguments(format!("no expense matches `{}`", target)))
}
