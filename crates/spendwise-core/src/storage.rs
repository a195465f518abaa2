use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock},
};

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use spendwise_domain::{ExpenseRecord, LedgerState};

use crate::{CoreError, CoreResult};

/// Key holding the wallet balance as a JSON number.
pub const BALANCE_KEY: &str = "walletBalance";
/// Key holding the full expense list as a JSON array.
pub const EXPENSES_KEY: &str = "expenses";

/// Abstraction over key-value persistence backends holding JSON values.
///
/// Writes replace the whole value stored under a key. Implementations are
/// best-effort and need not be transactional across keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> CoreResult<Option<Value>>;
    fn set(&self, key: &str, value: &Value) -> CoreResult<()>;
    fn remove(&self, key: &str) -> CoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> CoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        (**self).remove(key)
    }
}

/// Which persisted keys a committed ledger operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerChange {
    pub balance: bool,
    pub records: bool,
}

impl LedgerChange {
    pub const NONE: LedgerChange = LedgerChange {
        balance: false,
        records: false,
    };
    pub const BALANCE: LedgerChange = LedgerChange {
        balance: true,
        records: false,
    };
    pub const ALL: LedgerChange = LedgerChange {
        balance: true,
        records: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.balance && !self.records
    }
}

/// In-process store, useful for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: Value) -> Self {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> CoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Reads and decodes `key`, returning `Ok(None)` when the key is absent.
pub fn load_value<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CoreResult<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Like [`load_value`], but degrades to `default` on absence or any failure.
pub fn load_or_default<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match load_value(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to load stored value, using default");
            default
        }
    }
}

/// Encodes `value` and overwrites whatever is stored under `key`.
pub fn save_value<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> CoreResult<()> {
    let encoded = serde_json::to_value(value)?;
    store.set(key, &encoded)
}

/// Restores a ledger snapshot, falling back per key to the defaults.
pub fn load_ledger_state(store: &dyn KeyValueStore, default_balance: Decimal) -> LedgerState {
    let balance = load_or_default(store, BALANCE_KEY, default_balance);
    let records: Vec<ExpenseRecord> = load_or_default(store, EXPENSES_KEY, Vec::new());
    LedgerState::new(balance, records)
}

/// Writes the keys named by `change`. Failures are logged and dropped so a
/// committed in-memory mutation is never undone by storage trouble.
pub fn persist_ledger_state(store: &dyn KeyValueStore, state: &LedgerState, change: LedgerChange) {
    if change.balance {
        if let Err(err) = save_value(store, BALANCE_KEY, &state.balance) {
            tracing::error!(key = BALANCE_KEY, error = %err, "failed to persist wallet balance");
        }
    }
    if change.records {
        if let Err(err) = save_value(store, EXPENSES_KEY, &state.records) {
            tracing::error!(key = EXPENSES_KEY, error = %err, "failed to persist expenses");
        }
    }
}

/// Detects anomalies within a restored ledger snapshot.
pub fn ledger_warnings(state: &LedgerState) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for record in &state.records {
        if !seen.insert(&record.id) {
            warnings.push(format!("expense id {} appears more than once", record.id));
        }
        if record.amount <= Decimal::ZERO {
            warnings.push(format!(
                "expense {} has non-positive amount {}",
                record.id, record.amount
            ));
        }
        if record.title.trim().is_empty() {
            warnings.push(format!("expense {} has an empty title", record.id));
        }
    }
    if state.balance.is_sign_negative() && !state.balance.is_zero() {
        warnings.push(format!("wallet balance is negative ({})", state.balance));
    }
    warnings
}
