use spendwise_config::Config;

use crate::cli::commands::usage_error;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" if args.len() >= 3 => {
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            context.config.set(&key, value.trim())?;
            context.persist_config()?;
            output::success(format!("{} set to {}.", key, context.config.get(&key)?));
            if matches!(key.as_str(), "initial_balance" | "data_root") {
                output::hint("Takes effect the next time the wallet is opened.");
            }
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    let mut rows = Vec::with_capacity(Config::KEYS.len());
    for key in Config::KEYS {
        rows.push((key, context.config.get(key)?));
    }
    output::two_column(&rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use spendwise_config::{Config, ConfigManager};
    use spendwise_core::{MemoryStore, SystemClock, Wallet};
    use tempfile::tempdir;

    use crate::cli::core::{CliMode, CommandError, ShellContext};
    use crate::cli::shell::handle_line;

    #[test]
    fn set_persists_the_preference() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::for_home(dir.path());
        let wallet = Wallet::open(Box::new(MemoryStore::new()), dec!(5000));
        let mut ctx = ShellContext::with_parts(
            CliMode::Script,
            wallet,
            Config::default(),
            Some(manager.clone()),
            Box::new(SystemClock),
        );

        handle_line(&mut ctx, "config set top_expenses 3").unwrap();
        assert_eq!(ctx.config.top_expenses, 3);
        assert_eq!(manager.load().unwrap().top_expenses, 3);

        assert!(matches!(
            handle_line(&mut ctx, "config set theme dark"),
            Err(CommandError::Config(_))
        ));
        assert!(handle_line(&mut ctx, "config show").is_ok());
    }
}
