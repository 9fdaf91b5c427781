//! Ministerial CLI - Command-line front-end for the pairing engine.

use anyhow::Context;
use clap::Parser;
use ministerial_cli::commands;
use ministerial_cli::{Cli, Command, Config, Formatter};
use ministerial_pairing::PairingValidator;
use ministerial_store::SqliteStore;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when an audit finds pairs that must change.
const EXIT_INVALID_PAIRS: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    if cli.config.is_none() && !Config::path()?.exists() {
        config.save().ok();
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let db_path = config.database_path(cli.db.as_deref())?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let store = SqliteStore::new(&db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;

    let code = match cli.command {
        Command::Import(args) => {
            commands::execute_import(args, &store, config.pairing.minor_age, &formatter)?;
            ExitCode::SUCCESS
        }
        Command::Validate(args) => {
            commands::execute_validate(args, &validator(store, &config), &formatter).await?;
            ExitCode::SUCCESS
        }
        Command::Candidates(args) => {
            commands::execute_candidates(args, &validator(store, &config), &formatter).await?;
            ExitCode::SUCCESS
        }
        Command::Audit(args) => {
            let audit =
                commands::execute_audit(args, &validator(store, &config), &formatter).await?;
            if audit.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_INVALID_PAIRS)
            }
        }
        Command::Qualify(args) => {
            commands::execute_qualify(args, &validator(store, &config), &formatter).await?;
            ExitCode::SUCCESS
        }
        Command::Stats => {
            commands::execute_stats(&validator(store, &config), &formatter).await?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

fn validator(store: SqliteStore, config: &Config) -> PairingValidator<SqliteStore> {
    PairingValidator::new(store, config.pairing.clone())
}
