//! Report service: fetches aggregates from the store and assembles reports.

use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use futures::future::try_join_all;
use ledgerwise_shared::types::UserId;

use super::builder;
use super::error::ReportError;
use super::types::{
    BudgetAnalysis, ExpenseBreakdown, IncomeStatement, MonthPeriod, MonthlySummary,
    MonthlyTotals, QuickStats, Report, ReportDescriptor, ReportKind, ReportRequest,
    TrendAnalysis,
};
use super::window::{
    DateRange, RelativeWindow, calendar_month, month_name, parse_date, previous_month, today,
};
use crate::budget::Budget;
use crate::ledger::TransactionType;
use crate::store::{BudgetQuery, LedgerStore, TransactionFilter};

/// Earliest year accepted by the monthly summary.
pub const MIN_SUMMARY_YEAR: i32 = 2000;
/// Latest year accepted by the monthly summary.
pub const MAX_SUMMARY_YEAR: i32 = 2100;
/// Longest trend lookback in months.
pub const MAX_TREND_MONTHS: u32 = 36;
/// Trend lookback used when a request omits one.
pub const DEFAULT_TREND_MONTHS: u32 = 12;

/// Report generation service.
pub struct ReportService<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> ReportService<S> {
    /// Create a new report service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The available report kinds.
    #[must_use]
    pub fn catalog() -> Vec<ReportDescriptor> {
        ReportKind::ALL
            .into_iter()
            .map(|kind| ReportDescriptor {
                kind,
                name: kind.title().to_string(),
                description: kind.description().to_string(),
                requires_date_range: kind.requires_date_range(),
            })
            .collect()
    }

    /// Generates the report described by `request`.
    pub async fn generate(
        &self,
        user_id: UserId,
        request: &ReportRequest,
    ) -> Result<Report, ReportError> {
        self.generate_as_of(user_id, request, today())
            .await
    }

    /// [`Self::generate`] evaluated as if today were `today`.
    pub async fn generate_as_of(
        &self,
        user_id: UserId,
        request: &ReportRequest,
        today: NaiveDate,
    ) -> Result<Report, ReportError> {
        let range = |start: Option<&str>, end: Option<&str>| -> Result<DateRange, ReportError> {
            let default = DateRange::month_to_date(today);
            let start = start.map_or(Ok(default.start_date), parse_date)?;
            let end = end.map_or(Ok(default.end_date), parse_date)?;
            DateRange::new(start, end, today)
        };

        let report = match request {
            ReportRequest::IncomeStatement {
                start_date,
                end_date,
            } => {
                let range = range(start_date.as_deref(), end_date.as_deref())?;
                Report::IncomeStatement(self.income_statement(user_id, range).await?)
            }
            ReportRequest::ExpenseBreakdown {
                start_date,
                end_date,
            } => {
                let range = range(start_date.as_deref(), end_date.as_deref())?;
                Report::ExpenseBreakdown(self.expense_breakdown(user_id, range).await?)
            }
            ReportRequest::BudgetAnalysis { period } => Report::BudgetAnalysis(
                self.budget_analysis_as_of(user_id, *period, today).await?,
            ),
            ReportRequest::MonthlySummary { year, month } => Report::MonthlySummary(
                self.monthly_summary(
                    user_id,
                    year.unwrap_or_else(|| today.year()),
                    month.unwrap_or_else(|| today.month()),
                )
                .await?,
            ),
            ReportRequest::TrendAnalysis { months } => Report::TrendAnalysis(
                self.trend_analysis_as_of(
                    user_id,
                    months.unwrap_or(DEFAULT_TREND_MONTHS),
                    today,
                )
                .await?,
            ),
        };

        tracing::debug!(user_id = %user_id, kind = %report.kind(), "report generated");
        Ok(report)
    }

    /// Income and expenses per category over `range`.
    pub async fn income_statement(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<IncomeStatement, ReportError> {
        let filter = TransactionFilter::for_user(user_id).between(range.start_date, range.end_date);
        let rows = self.store.category_totals(&filter).await?;
        Ok(builder::income_statement(range, rows))
    }

    /// Expense statistics per category over `range`.
    pub async fn expense_breakdown(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<ExpenseBreakdown, ReportError> {
        let filter = TransactionFilter::for_user(user_id)
            .of_type(TransactionType::Expense)
            .between(range.start_date, range.end_date);
        let rows = self.store.category_totals(&filter).await?;
        Ok(builder::expense_breakdown(range, rows))
    }

    /// Active budgets against spending inside a window relative to today.
    pub async fn budget_analysis(
        &self,
        user_id: UserId,
        window: RelativeWindow,
    ) -> Result<BudgetAnalysis, ReportError> {
        self.budget_analysis_as_of(user_id, window, today())
            .await
    }

    /// [`Self::budget_analysis`] evaluated as if today were `today`.
    pub async fn budget_analysis_as_of(
        &self,
        user_id: UserId,
        window: RelativeWindow,
        today: NaiveDate,
    ) -> Result<BudgetAnalysis, ReportError> {
        let budgets = self
            .store
            .find_budgets(user_id, &BudgetQuery::default())
            .await?;
        let (from, to) = window.bounds(today);

        let store = self.store.as_ref();
        let measured = try_join_all(budgets.into_iter().map(|budget: Budget| async move {
            let mut filter = TransactionFilter::for_user(user_id)
                .category(budget.category_id)
                .of_type(TransactionType::Expense)
                .since(from);
            filter.to = to;
            let spent = store.sum_amount(&filter).await?;
            Ok::<_, ReportError>((budget, spent))
        }))
        .await?;

        Ok(builder::budget_analysis(window, measured))
    }

    /// Detailed view of one calendar month.
    pub async fn monthly_summary(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, ReportError> {
        if !(MIN_SUMMARY_YEAR..=MAX_SUMMARY_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(ReportError::InvalidMonth { year, month });
        }
        let (start_date, end_date) =
            calendar_month(year, month).ok_or(ReportError::InvalidMonth { year, month })?;

        let filter = TransactionFilter::for_user(user_id).between(start_date, end_date);
        let (rows, daily) = futures::try_join!(
            self.store.category_totals(&filter),
            self.store.daily_totals(&filter),
        )?;

        let period = MonthPeriod {
            year,
            month,
            month_name: month_name(month),
            start_date,
            end_date,
        };
        Ok(builder::monthly_summary(period, rows, daily))
    }

    /// Month-over-month trends for the last `months` months.
    pub async fn trend_analysis(
        &self,
        user_id: UserId,
        months: u32,
    ) -> Result<TrendAnalysis, ReportError> {
        self.trend_analysis_as_of(user_id, months, today())
            .await
    }

    /// [`Self::trend_analysis`] evaluated as if today were `today`.
    pub async fn trend_analysis_as_of(
        &self,
        user_id: UserId,
        months: u32,
        today: NaiveDate,
    ) -> Result<TrendAnalysis, ReportError> {
        if !(1..=MAX_TREND_MONTHS).contains(&months) {
            return Err(ReportError::InvalidTrendMonths(months));
        }
        let since = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);

        let filter = TransactionFilter::for_user(user_id).since(since);
        let rows = self.store.monthly_totals(&filter).await?;
        Ok(builder::trend_analysis(months, &rows))
    }

    /// This month's totals against last month's.
    pub async fn quick_stats(&self, user_id: UserId) -> Result<QuickStats, ReportError> {
        self.quick_stats_as_of(user_id, today())
            .await
    }

    /// [`Self::quick_stats`] evaluated as if today were `today`.
    pub async fn quick_stats_as_of(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<QuickStats, ReportError> {
        let (last_year, last_month) = previous_month(today);
        let (current, last) = futures::try_join!(
            self.month_totals(user_id, today.year(), today.month()),
            self.month_totals(user_id, last_year, last_month),
        )?;
        Ok(builder::quick_stats(current, last))
    }

    async fn month_totals(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<MonthlyTotals, ReportError> {
        let (start_date, end_date) =
            calendar_month(year, month).ok_or(ReportError::InvalidMonth { year, month })?;
        let filter = TransactionFilter::for_user(user_id).between(start_date, end_date);
        let rows = self.store.category_totals(&filter).await?;
        Ok(builder::monthly_totals(&rows))
    }
}
