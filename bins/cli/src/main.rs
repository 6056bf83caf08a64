//! Ledgerwise CLI - budgets, alerts and financial reports
//!
//! Usage:
//!   ledgerwise --user <ID> budgets list          List budgets with usage
//!   ledgerwise --user <ID> record <CAT> 120 Lunch Record an expense
//!   ledgerwise --user <ID> infer --months 6       Create budgets from history
//!   ledgerwise --user <ID> export trend-analysis  Write a report to disk

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ledgerwise_shared::AppConfig;
use ledgerwise_shared::types::UserId;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::App;

fn init_tracing(cli: &Cli) {
    // Priority: RUST_LOG env var > --verbose flag > default
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("ledgerwise=info,sqlx=warn")
    };

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn require_user(user: Option<UserId>) -> Result<UserId> {
    user.context("no user given; pass --user or set LEDGERWISE_USER")
}

async fn run(cli: Cli) -> Result<bool> {
    if matches!(cli.command, Commands::Catalog) {
        return commands::cmd_catalog();
    }

    let config = AppConfig::load().context("failed to load configuration")?;
    let user = require_user(cli.user)?;
    let app = App::connect(&config).await?;

    match cli.command {
        Commands::Budgets { action } => commands::cmd_budgets(&app, user, action).await,
        Commands::Alerts => commands::cmd_alerts(&app, user).await,
        Commands::Preview {
            category,
            amount,
            date,
        } => commands::cmd_preview(&app, user, category, amount, date).await,
        Commands::Record(args) => commands::cmd_record(&app, user, args).await,
        Commands::Infer { months, dry_run } => {
            commands::cmd_infer(&app, user, months, dry_run).await
        }
        Commands::Report(args) => commands::cmd_report(&app, user, &args).await,
        Commands::Export { report, format } => {
            commands::cmd_export(&app, user, &report, format).await
        }
        Commands::Catalog => commands::cmd_catalog(),
        Commands::QuickStats => commands::cmd_quick_stats(&app, user).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
