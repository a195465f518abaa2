//! Shell state, error types, and command dispatch.

use std::{
    io,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use spendwise_config::{Config, ConfigError, ConfigManager};
use spendwise_core::{format::format_amount, Clock, CoreError, SystemClock, Wallet};
use spendwise_domain::{ExpenseId, ExpenseRecord};
use spendwise_storage_json::JsonFileStore;
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::{
    commands,
    output::{self, OutputPreferences},
    registry::{CommandEntry, CommandRegistry},
};
use crate::utils::paths;

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Everything a command handler needs: the wallet, preferences, and a clock.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    pub(crate) wallet: Wallet,
    pub(crate) config: Config,
    config_manager: Option<ConfigManager>,
    data_dir: Option<PathBuf>,
    clock: Box<dyn Clock>,
    registry: CommandRegistry,
}

impl ShellContext {
    /// Opens the wallet stored under the application data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = paths::app_data_dir();
        let config_manager = ConfigManager::for_home(&home);
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load configuration, using defaults");
                Config::default()
            }
        };
        let data_dir = config.resolve_data_root(&home);
        let store = JsonFileStore::new(data_dir.clone())?;
        let wallet = Wallet::open(Box::new(store), config.initial_balance);
        let mut context = Self::with_parts(
            mode,
            wallet,
            config,
            Some(config_manager),
            Box::new(SystemClock),
        );
        context.data_dir = Some(data_dir);
        Ok(context)
    }

    pub fn with_parts(
        mode: CliMode,
        wallet: Wallet,
        config: Config,
        config_manager: Option<ConfigManager>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::default();
        commands::register_all(&mut registry);
        let context = Self {
            mode,
            running: true,
            wallet,
            config,
            config_manager,
            data_dir: None,
            clock,
            registry,
        };
        context.apply_output_preferences();
        context
    }

    pub(crate) fn prompt(&self) -> String {
        format!("spendwise [{}]> ", self.money(self.wallet.balance()))
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn commands(&self) -> Vec<&CommandEntry> {
        self.registry.list()
    }

    pub(crate) fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub(crate) fn config_path(&self) -> Option<&Path> {
        self.config_manager
            .as_ref()
            .map(|manager| manager.config_path())
    }

    pub(crate) fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub(crate) fn money(&self, amount: Decimal) -> String {
        format_amount(amount, &self.config.currency_symbol)
    }

    /// Resolves a command argument to an expense id: an exact id first, then
    /// a 1-based position in the `list` output.
    pub(crate) fn resolve_expense(&self, raw: &str) -> Option<&ExpenseRecord> {
        let id = ExpenseId::from(raw);
        if let Some(record) = self.wallet.record(&id) {
            return Some(record);
        }
        raw.parse::<usize>()
            .ok()
            .filter(|index| *index >= 1)
            .and_then(|index| self.wallet.records().get(index - 1))
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        if let Some(manager) = &self.config_manager {
            manager.save(&self.config)?;
        }
        self.apply_output_preferences();
        Ok(())
    }

    fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled && self.mode == CliMode::Interactive,
        });
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::hint(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(CoreError::InsufficientBalance {
                requested,
                available,
            }) => {
                output::error(format!(
                    "Insufficient wallet balance: {} requested, {} available.",
                    self.money(requested),
                    self.money(available)
                ));
                output::hint("Use `topup <amount>` to add funds first.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}
