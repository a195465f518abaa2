//! spendwise-core
//!
//! Ledger state transitions, derived views, and the persistence contract.
//! Depends on spendwise-domain. No CLI, no terminal I/O, no filesystem access.

pub mod aggregator;
pub mod error;
pub mod format;
pub mod ledger;
pub mod shared;
pub mod storage;
pub mod time;
pub mod wallet;

pub use aggregator::*;
pub use error::{CoreError, CoreResult};
pub use ledger::ExpenseLedger;
pub use shared::SharedWallet;
pub use storage::{KeyValueStore, LedgerChange, MemoryStore, BALANCE_KEY, EXPENSES_KEY};
pub use time::{Clock, SystemClock};
pub use wallet::Wallet;

#[cfg(test)]
mod tests;
