//! Command implementations.
//!
//! Every command prints the `{success, message, data}` envelope as JSON on
//! stdout and reports whether the operation succeeded.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ledgerwise_core::budget::{
    AlertService, BUDGET_CREATED, BUDGET_DELETED, BUDGET_UPDATED, BudgetPatch, BudgetService,
    CreateBudgetInput,
};
use ledgerwise_core::inference::BudgetInference;
use ledgerwise_core::ledger::{NewTransaction, TRANSACTION_RECORDED, TransactionRecorder};
use ledgerwise_core::reports::{
    ExportFormat, ReportExporter, ReportKind, ReportRequest, ReportService, today,
};
use ledgerwise_db::SeaLedgerStore;
use ledgerwise_shared::types::{ApiResponse, CategoryId, UserId, respond};
use ledgerwise_shared::{AppConfig, AppError};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::{BudgetsAction, RecordArgs, ReportArgs};

/// Services wired to one store.
pub struct App {
    budgets: BudgetService<SeaLedgerStore>,
    alerts: AlertService<SeaLedgerStore>,
    recorder: TransactionRecorder<SeaLedgerStore>,
    inference: BudgetInference<SeaLedgerStore>,
    reports: ReportService<SeaLedgerStore>,
    exporter: ReportExporter,
    lookback_months: u32,
}

impl App {
    /// Connects to the database and builds the services.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let db = ledgerwise_db::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        let store = Arc::new(SeaLedgerStore::new(db));
        Ok(Self::with_store(store, config))
    }

    fn with_store(store: Arc<SeaLedgerStore>, config: &AppConfig) -> Self {
        let analytics = &config.analytics;
        let alerts = || {
            AlertService::new(Arc::clone(&store))
                .with_currency_symbol(analytics.currency_symbol.clone())
        };

        Self {
            budgets: BudgetService::new(Arc::clone(&store))
                .with_default_threshold(analytics.default_alert_threshold),
            alerts: alerts(),
            recorder: TransactionRecorder::new(Arc::clone(&store), alerts()),
            inference: BudgetInference::new(Arc::clone(&store)),
            reports: ReportService::new(Arc::clone(&store)),
            exporter: ReportExporter::new(
                analytics.export_dir.clone(),
                analytics.export_url_prefix.clone(),
            ),
            lookback_months: analytics.inference_lookback_months,
        }
    }
}

/// Prints an envelope and returns its success flag.
fn emit<T: Serialize>(response: &ApiResponse<T>) -> Result<bool> {
    let json = serde_json::to_string_pretty(response).context("failed to serialize response")?;
    println!("{json}");
    Ok(response.success)
}

pub async fn cmd_budgets(app: &App, user: UserId, action: BudgetsAction) -> Result<bool> {
    match action {
        BudgetsAction::List { period, all } => emit(&respond(
            app.budgets.get_for_user(user, period, !all).await,
            "Budgets retrieved successfully",
        )),
        BudgetsAction::Show { id } => emit(&respond(
            app.budgets.get(user, id).await,
            "Budget retrieved successfully",
        )),
        BudgetsAction::Create {
            category,
            amount,
            period,
            start,
            end,
            threshold,
        } => {
            let input = CreateBudgetInput {
                category_id: category,
                budget_amount: amount,
                period,
                start_date: start,
                end_date: end,
                alert_threshold: threshold,
            };
            emit(&respond(
                app.budgets.create(user, input).await,
                BUDGET_CREATED,
            ))
        }
        BudgetsAction::Update {
            id,
            amount,
            period,
            start,
            end,
            threshold,
        } => {
            let patch = BudgetPatch {
                budget_amount: amount,
                period,
                start_date: start,
                end_date: end,
                alert_threshold: threshold,
            };
            emit(&respond(
                app.budgets.update(user, id, patch).await,
                BUDGET_UPDATED,
            ))
        }
        BudgetsAction::Delete { id } => emit(&respond(
            app.budgets.delete(user, id).await,
            BUDGET_DELETED,
        )),
        BudgetsAction::Stats { period } => emit(&respond(
            app.budgets.usage_statistics(user, period).await,
            "Budget statistics retrieved successfully",
        )),
    }
}

pub async fn cmd_alerts(app: &App, user: UserId) -> Result<bool> {
    emit(&respond(
        app.alerts.get_alerts(user).await,
        "Budget alerts retrieved successfully",
    ))
}

pub async fn cmd_preview(
    app: &App,
    user: UserId,
    category: CategoryId,
    amount: Decimal,
    date: Option<NaiveDate>,
) -> Result<bool> {
    let date = date.unwrap_or_else(today);
    emit(&respond(
        app.alerts
            .preview_transaction_impact(user, category, amount, date)
            .await,
        "Budget impact calculated",
    ))
}

pub async fn cmd_record(app: &App, user: UserId, args: RecordArgs) -> Result<bool> {
    let input = NewTransaction {
        user_id: user,
        category_id: args.category,
        transaction_type: args.transaction_type,
        amount: args.amount,
        description: args.description,
        transaction_date: args.date.unwrap_or_else(today),
        payment_method: args.payment_method,
        reference_number: args.reference,
        notes: args.notes,
        status: None,
    };
    emit(&respond(
        app.recorder.record(input).await,
        TRANSACTION_RECORDED,
    ))
}

pub async fn cmd_infer(app: &App, user: UserId, months: Option<u32>, dry_run: bool) -> Result<bool> {
    let months = months.unwrap_or(app.lookback_months);
    if dry_run {
        return emit(&respond(
            app.inference.patterns(user, months).await,
            "Spending patterns analysed",
        ));
    }

    match app.inference.infer(user, months).await {
        Ok(outcome) => {
            let message = outcome.message();
            emit(&ApiResponse::ok(message, outcome))
        }
        Err(err) => emit(&respond::<(), _>(Err(err), "")),
    }
}

/// Builds the request for a report kind from the command-line options.
pub fn report_request(args: &ReportArgs) -> ReportRequest {
    match args.kind {
        ReportKind::IncomeStatement => ReportRequest::IncomeStatement {
            start_date: args.start.clone(),
            end_date: args.end.clone(),
        },
        ReportKind::ExpenseBreakdown => ReportRequest::ExpenseBreakdown {
            start_date: args.start.clone(),
            end_date: args.end.clone(),
        },
        ReportKind::BudgetAnalysis => ReportRequest::BudgetAnalysis {
            period: args.window.unwrap_or_default(),
        },
        ReportKind::MonthlySummary => ReportRequest::MonthlySummary {
            year: args.year,
            month: args.month,
        },
        ReportKind::TrendAnalysis => ReportRequest::TrendAnalysis {
            months: args.months,
        },
    }
}

pub async fn cmd_report(app: &App, user: UserId, args: &ReportArgs) -> Result<bool> {
    emit(&respond(
        app.reports.generate(user, &report_request(args)).await,
        "Report generated successfully",
    ))
}

pub async fn cmd_export(
    app: &App,
    user: UserId,
    args: &ReportArgs,
    format: ExportFormat,
) -> Result<bool> {
    let result = match app.reports.generate(user, &report_request(args)).await {
        Ok(report) => app.exporter.export(&report, format).await,
        Err(err) => Err(err),
    };
    emit(&respond(result, "Report exported successfully"))
}

pub fn cmd_catalog() -> Result<bool> {
    emit(&respond::<_, AppError>(
        Ok(ReportService::<SeaLedgerStore>::catalog()),
        "Available reports",
    ))
}

pub async fn cmd_quick_stats(app: &App, user: UserId) -> Result<bool> {
    emit(&respond(
        app.reports.quick_stats(user).await,
        "Quick stats retrieved successfully",
    ))
}
