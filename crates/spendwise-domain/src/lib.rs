//! spendwise-domain
//!
//! Pure domain models (expense records, categories, ledger state).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod ledger;
pub mod record;

pub use category::*;
pub use common::*;
pub use ledger::*;
pub use record::*;
