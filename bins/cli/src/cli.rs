//! CLI argument definitions using clap.
//!
//! The command implementations are in the `commands` module.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ledgerwise_core::budget::BudgetPeriod;
use ledgerwise_core::ledger::TransactionType;
use ledgerwise_core::reports::{ExportFormat, RelativeWindow, ReportKind};
use ledgerwise_shared::types::{BudgetId, CategoryId, UserId};
use rust_decimal::Decimal;

/// Ledgerwise - budgets, alerts and financial reports
#[derive(Debug, Parser)]
#[command(name = "ledgerwise")]
#[command(about = "Budget tracking and financial analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// User to act as
    #[arg(long, env = "LEDGERWISE_USER", global = true)]
    pub user: Option<UserId>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage budgets
    Budgets {
        #[command(subcommand)]
        action: BudgetsAction,
    },

    /// List budgets in warning or over budget
    Alerts,

    /// Show how an expense would affect the budget in effect
    Preview {
        /// Category ID
        category: CategoryId,
        /// Expense amount
        amount: Decimal,
        /// Transaction date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record a transaction
    Record(RecordArgs),

    /// Create monthly budgets from recent spending
    Infer {
        /// Months of history to analyse (1-12)
        #[arg(short, long)]
        months: Option<u32>,

        /// Only show the spending patterns
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate a report
    Report(ReportArgs),

    /// Generate a report and write it to the export directory
    Export {
        #[command(flatten)]
        report: ReportArgs,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
    },

    /// List the available reports
    Catalog,

    /// This month against last month
    QuickStats,
}

#[derive(Debug, Subcommand)]
pub enum BudgetsAction {
    /// List budgets with usage, newest first
    List {
        /// Only budgets with this period label
        #[arg(long)]
        period: Option<BudgetPeriod>,

        /// Include deleted budgets
        #[arg(long)]
        all: bool,
    },

    /// Show one budget with usage
    Show {
        /// Budget ID
        id: BudgetId,
    },

    /// Create a budget
    Create {
        /// Category ID
        category: CategoryId,
        /// Cap
        amount: Decimal,
        /// weekly, monthly, quarterly or yearly
        #[arg(long, default_value = "monthly")]
        period: String,
        /// First day in effect
        #[arg(long)]
        start: NaiveDate,
        /// Last day in effect
        #[arg(long)]
        end: NaiveDate,
        /// Warning threshold in percent
        #[arg(long)]
        threshold: Option<Decimal>,
    },

    /// Update fields of a budget
    Update {
        /// Budget ID
        id: BudgetId,
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        threshold: Option<Decimal>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },

    /// Usage totals over active budgets
    Stats {
        /// Only budgets with this period label
        #[arg(long)]
        period: Option<BudgetPeriod>,
    },
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Category ID
    pub category: CategoryId,
    /// Amount
    pub amount: Decimal,
    /// Description
    pub description: String,
    /// income or expense
    #[arg(long = "type", default_value = "expense")]
    pub transaction_type: TransactionType,
    /// Transaction date (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub payment_method: Option<String>,
    #[arg(long)]
    pub reference: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// income-statement, expense-breakdown, budget-analysis, monthly-summary or trend-analysis
    pub kind: ReportKind,
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
    /// Window for budget analysis: today, week, month, quarter or year
    #[arg(long)]
    pub window: Option<RelativeWindow>,
    /// Year for the monthly summary
    #[arg(long)]
    pub year: Option<i32>,
    /// Month for the monthly summary
    #[arg(long)]
    pub month: Option<u32>,
    /// Lookback for trend analysis
    #[arg(long)]
    pub months: Option<u32>,
}
