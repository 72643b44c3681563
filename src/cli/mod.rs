//! Command-line interface for the wallet

pub mod commands;

pub use commands::{AppState, CliResult};
