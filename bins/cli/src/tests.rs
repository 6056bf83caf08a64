//! CLI parsing tests

use clap::Parser;
use ledgerwise_core::budget::BudgetPeriod;
use ledgerwise_core::ledger::TransactionType;
use ledgerwise_core::reports::{ExportFormat, RelativeWindow, ReportKind, ReportRequest};
use rust_decimal_macros::dec;

use crate::cli::{BudgetsAction, Cli, Commands};
use crate::commands::report_request;

const USER: &str = "01890a5d-ac96-774b-bcce-b302099a8057";
const CATEGORY: &str = "01890a5d-ac96-774b-bcce-b302099a8058";

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("ledgerwise").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_budget_create_defaults_to_monthly() {
    let cli = parse(&[
        "--user", USER, "budgets", "create", CATEGORY, "1000", "--start", "2024-01-01", "--end",
        "2024-01-31",
    ]);
    assert_eq!(cli.user.unwrap().to_string(), USER);
    match cli.command {
        Commands::Budgets {
            action:
                BudgetsAction::Create {
                    amount,
                    period,
                    threshold,
                    ..
                },
        } => {
            assert_eq!(amount, dec!(1000));
            assert_eq!(period, "monthly");
            assert!(threshold.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_budget_list_period_filter() {
    let cli = parse(&["budgets", "list", "--period", "weekly", "--all"]);
    match cli.command {
        Commands::Budgets {
            action: BudgetsAction::List { period, all },
        } => {
            assert_eq!(period, Some(BudgetPeriod::Weekly));
            assert!(all);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_rejects_unknown_period_label() {
    let result = Cli::try_parse_from(["ledgerwise", "budgets", "list", "--period", "daily"]);
    assert!(result.is_err());
}

#[test]
fn test_rejects_malformed_user() {
    let result = Cli::try_parse_from(["ledgerwise", "--user", "not-a-uuid", "alerts"]);
    assert!(result.is_err());
}

#[test]
fn test_record_defaults_to_expense() {
    let cli = parse(&["record", CATEGORY, "120.50", "Lunch"]);
    match cli.command {
        Commands::Record(args) => {
            assert_eq!(args.transaction_type, TransactionType::Expense);
            assert_eq!(args.amount, dec!(120.50));
            assert_eq!(args.description, "Lunch");
            assert!(args.date.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_record_income() {
    let cli = parse(&[
        "record", CATEGORY, "5000", "Salary", "--type", "income", "--date", "2024-03-01",
    ]);
    match cli.command {
        Commands::Record(args) => assert_eq!(args.transaction_type, TransactionType::Income),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_export_format() {
    let cli = parse(&["export", "expense-breakdown", "--format", "json"]);
    match cli.command {
        Commands::Export { report, format } => {
            assert_eq!(report.kind, ReportKind::ExpenseBreakdown);
            assert_eq!(format, ExportFormat::Json);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = parse(&["export", "income-statement"]);
    match cli.command {
        Commands::Export { format, .. } => assert_eq!(format, ExportFormat::Csv),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_report_request_from_args() {
    let cli = parse(&[
        "report",
        "income-statement",
        "--start",
        "2024-01-01",
        "--end",
        "2024-01-31",
    ]);
    let Commands::Report(args) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(
        report_request(&args),
        ReportRequest::IncomeStatement {
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
        }
    );
}

#[test]
fn test_budget_analysis_window_defaults_to_month() {
    let cli = parse(&["report", "budget-analysis"]);
    let Commands::Report(args) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(
        report_request(&args),
        ReportRequest::BudgetAnalysis {
            period: RelativeWindow::Month
        }
    );

    let cli = parse(&["report", "budget-analysis", "--window", "quarter"]);
    let Commands::Report(args) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(
        report_request(&args),
        ReportRequest::BudgetAnalysis {
            period: RelativeWindow::Quarter
        }
    );
}

#[test]
fn test_trend_and_monthly_summary_options() {
    let cli = parse(&["report", "trend-analysis", "--months", "6"]);
    let Commands::Report(args) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(
        report_request(&args),
        ReportRequest::TrendAnalysis { months: Some(6) }
    );

    let cli = parse(&["report", "monthly-summary", "--year", "2024", "--month", "2"]);
    let Commands::Report(args) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(
        report_request(&args),
        ReportRequest::MonthlySummary {
            year: Some(2024),
            month: Some(2)
        }
    );
}

#[test]
fn test_unknown_report_kind() {
    let result = Cli::try_parse_from(["ledgerwise", "report", "balance-sheet"]);
    assert!(result.is_err());
}
