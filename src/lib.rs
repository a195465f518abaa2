#![doc(test(attr(deny(warnings))))]

//! Spendwise keeps a wallet balance and the expenses reserved against it,
//! persists both to a key-value store, and derives summary views. This crate
//! wires the engine to a JSON store, user configuration, and a text CLI.

pub mod cli;
pub mod utils;

pub use spendwise_config as config;
pub use spendwise_core as core;
pub use spendwise_domain as domain;
pub use spendwise_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Spendwise tracing initialized.");
    });
}
