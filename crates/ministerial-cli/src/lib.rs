//! Ministerial CLI library.
//!
//! Operator front-end for the pairing engine: loads student snapshots into
//! the SQLite store and runs pair validation, candidate resolution, audits
//! and qualification checks against it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
