//! Report data types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use ledgerwise_shared::types::{BudgetId, CategoryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use super::window::{DateRange, RelativeWindow};
use crate::budget::{BudgetPeriod, BudgetStatus};
use crate::ledger::TransactionType;
use crate::store::DailyTotal;

/// The fixed set of report shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Income vs expenses by category.
    IncomeStatement,
    /// Spending by category with statistics.
    ExpenseBreakdown,
    /// Budgets vs actual spending.
    BudgetAnalysis,
    /// One calendar month in detail.
    MonthlySummary,
    /// Month-over-month trends.
    TrendAnalysis,
}

impl ReportKind {
    /// All kinds in catalog order.
    pub const ALL: [Self; 5] = [
        Self::IncomeStatement,
        Self::ExpenseBreakdown,
        Self::BudgetAnalysis,
        Self::MonthlySummary,
        Self::TrendAnalysis,
    ];

    /// Returns the kebab-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncomeStatement => "income-statement",
            Self::ExpenseBreakdown => "expense-breakdown",
            Self::BudgetAnalysis => "budget-analysis",
            Self::MonthlySummary => "monthly-summary",
            Self::TrendAnalysis => "trend-analysis",
        }
    }

    /// Report title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::IncomeStatement => "Income Statement",
            Self::ExpenseBreakdown => "Expense Breakdown",
            Self::BudgetAnalysis => "Budget Analysis",
            Self::MonthlySummary => "Monthly Summary",
            Self::TrendAnalysis => "Trend Analysis",
        }
    }

    /// Catalog description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::IncomeStatement => "Compare income vs expenses over a period",
            Self::ExpenseBreakdown => "Detailed analysis of spending by category",
            Self::BudgetAnalysis => "Compare actual spending vs budgets",
            Self::MonthlySummary => "Complete overview of a specific month",
            Self::TrendAnalysis => "Track financial trends over time",
        }
    }

    /// Whether the report takes an explicit date range.
    #[must_use]
    pub const fn requires_date_range(self) -> bool {
        matches!(self, Self::IncomeStatement | Self::ExpenseBreakdown)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ReportError::InvalidReportType(s.to_string()))
    }
}

/// Catalog entry describing a report kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDescriptor {
    /// Kind identifier.
    pub kind: ReportKind,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Whether a date range is required.
    pub requires_date_range: bool,
}

/// One (category, type) total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLine {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category icon.
    pub category_icon: Option<String>,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Sum of amounts.
    pub total_amount: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
}

/// Income statement totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementSummary {
    /// Sum of income.
    pub total_income: Decimal,
    /// Sum of expenses.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net_income: Decimal,
}

/// Income statement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Title.
    pub title: String,
    /// Covered range.
    pub period: DateRange,
    /// Income rows, largest first.
    pub income: Vec<CategoryLine>,
    /// Expense rows, largest first.
    pub expenses: Vec<CategoryLine>,
    /// Totals.
    pub summary: IncomeStatementSummary,
}

/// Expense statistics for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category icon.
    pub category_icon: Option<String>,
    /// Category color.
    pub category_color: Option<String>,
    /// Sum of amounts.
    pub total_amount: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
    /// Mean amount.
    pub avg_amount: Decimal,
    /// Smallest amount.
    pub min_amount: Decimal,
    /// Largest amount.
    pub max_amount: Decimal,
    /// Share of all expenses in the range.
    pub percentage: Decimal,
}

/// Expense breakdown totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseBreakdownSummary {
    /// Sum of expenses.
    pub total_expenses: Decimal,
    /// Number of categories with expenses.
    pub category_count: usize,
    /// Largest category.
    pub highest_category: Option<ExpenseCategory>,
    /// `total_expenses / category_count`.
    pub avg_per_category: Decimal,
}

/// Expense breakdown report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    /// Title.
    pub title: String,
    /// Covered range.
    pub period: DateRange,
    /// Category rows, largest first.
    pub categories: Vec<ExpenseCategory>,
    /// Totals.
    pub summary: ExpenseBreakdownSummary,
}

/// One budget measured over a relative window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAnalysisRow {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Category name.
    pub category_name: String,
    /// Category icon.
    pub category_icon: Option<String>,
    /// Category color.
    pub category_color: Option<String>,
    /// Cap.
    pub budget_amount: Decimal,
    /// Period label.
    pub period: BudgetPeriod,
    /// Threshold percentage.
    pub alert_threshold: Decimal,
    /// Spending inside the window.
    pub actual_spending: Decimal,
    /// `budget_amount - actual_spending`.
    pub remaining_budget: Decimal,
    /// `actual_spending / budget_amount * 100`.
    pub usage_percentage: Decimal,
    /// Classification.
    pub status: BudgetStatus,
}

/// Budget analysis totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAnalysisSummary {
    /// Number of budgets.
    pub total_budgets: usize,
    /// Budgets over their cap.
    pub over_budget: usize,
    /// Budgets in warning.
    pub warning: usize,
    /// Budgets on track.
    pub on_track: usize,
    /// Sum of caps.
    pub total_allocated: Decimal,
    /// Sum of spending.
    pub total_spent: Decimal,
}

/// Budget analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    /// Title.
    pub title: String,
    /// Relative window.
    pub period: RelativeWindow,
    /// Rows, highest usage first.
    pub budgets: Vec<BudgetAnalysisRow>,
    /// Totals.
    pub summary: BudgetAnalysisSummary,
}

/// Calendar month covered by a monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// Year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
    /// English month name.
    pub month_name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
}

/// Monthly totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Sum of income.
    pub income: Decimal,
    /// Sum of expenses.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
    /// `(income + expenses) / transaction_count`.
    pub avg_transaction: Decimal,
}

/// Monthly summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Title.
    pub title: String,
    /// Covered month.
    pub period: MonthPeriod,
    /// Totals.
    pub summary: MonthlyTotals,
    /// Per-day totals, oldest first.
    pub daily_breakdown: Vec<DailyTotal>,
    /// Ten largest (category, type) rows.
    pub top_categories: Vec<CategoryLine>,
}

/// One month in a trend analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendMonth {
    /// Year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
    /// Display label, e.g. `March 2024`.
    pub month_name: String,
    /// Income.
    pub income: Decimal,
    /// Expenses.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net: Decimal,
    /// Income change vs the previous month with data, in percent.
    pub income_growth: Decimal,
    /// Expense change vs the previous month with data, in percent.
    pub expenses_growth: Decimal,
}

/// Trend analysis totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Mean monthly income.
    pub avg_monthly_income: Decimal,
    /// Mean monthly expenses.
    pub avg_monthly_expenses: Decimal,
    /// Income change from the oldest to the newest month, in percent.
    pub growth_rate_income: Decimal,
    /// Expense change from the oldest to the newest month, in percent.
    pub growth_rate_expenses: Decimal,
    /// Month with the highest net.
    pub best_month: Option<TrendMonth>,
    /// Month with the lowest net.
    pub worst_month: Option<TrendMonth>,
}

/// Trend analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Title.
    pub title: String,
    /// Label such as `12 months`.
    pub period: String,
    /// Months with data, newest first.
    pub monthly_data: Vec<TrendMonth>,
    /// Totals.
    pub summary: TrendSummary,
}

/// Any generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "report_type", rename_all = "kebab-case")]
pub enum Report {
    /// Income statement.
    IncomeStatement(IncomeStatement),
    /// Expense breakdown.
    ExpenseBreakdown(ExpenseBreakdown),
    /// Budget analysis.
    BudgetAnalysis(BudgetAnalysis),
    /// Monthly summary.
    MonthlySummary(MonthlySummary),
    /// Trend analysis.
    TrendAnalysis(TrendAnalysis),
}

impl Report {
    /// The report's kind.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::IncomeStatement(_) => ReportKind::IncomeStatement,
            Self::ExpenseBreakdown(_) => ReportKind::ExpenseBreakdown,
            Self::BudgetAnalysis(_) => ReportKind::BudgetAnalysis,
            Self::MonthlySummary(_) => ReportKind::MonthlySummary,
            Self::TrendAnalysis(_) => ReportKind::TrendAnalysis,
        }
    }

    /// The report's title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::IncomeStatement(r) => &r.title,
            Self::ExpenseBreakdown(r) => &r.title,
            Self::BudgetAnalysis(r) => &r.title,
            Self::MonthlySummary(r) => &r.title,
            Self::TrendAnalysis(r) => &r.title,
        }
    }
}

/// Parameters for generating a report of any kind.
///
/// Missing date bounds default to the first of the current month and today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "report_type", rename_all = "kebab-case")]
pub enum ReportRequest {
    /// Income statement over a date range.
    IncomeStatement {
        /// `YYYY-MM-DD`.
        #[serde(default)]
        start_date: Option<String>,
        /// `YYYY-MM-DD`.
        #[serde(default)]
        end_date: Option<String>,
    },
    /// Expense breakdown over a date range.
    ExpenseBreakdown {
        /// `YYYY-MM-DD`.
        #[serde(default)]
        start_date: Option<String>,
        /// `YYYY-MM-DD`.
        #[serde(default)]
        end_date: Option<String>,
    },
    /// Budget analysis over a relative window.
    BudgetAnalysis {
        /// Window; `month` by default.
        #[serde(default)]
        period: RelativeWindow,
    },
    /// Summary of one month; the current month by default.
    MonthlySummary {
        /// Year.
        #[serde(default)]
        year: Option<i32>,
        /// Month (1-12).
        #[serde(default)]
        month: Option<u32>,
    },
    /// Trends over the last `months` months (12 by default).
    TrendAnalysis {
        /// Lookback in months.
        #[serde(default)]
        months: Option<u32>,
    },
}

/// Growth of the current month over the previous one, in percent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyGrowth {
    /// Income growth.
    pub income: Decimal,
    /// Expense growth.
    pub expenses: Decimal,
    /// Net growth (relative to the absolute previous net).
    pub net: Decimal,
}

/// Dashboard figures: this month vs last month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStats {
    /// Current month totals.
    pub current_month: MonthlyTotals,
    /// Previous month totals.
    pub last_month: MonthlyTotals,
    /// Growth figures.
    pub growth: MonthlyGrowth,
}
