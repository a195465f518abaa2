//! Text shell over the wallet: a command registry, output helpers, and an
//! interactive or scripted read loop.

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use shell::run_cli;
