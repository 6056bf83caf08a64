//! Pure report assembly from store aggregates.
//!
//! Everything here is deterministic given its inputs, so the same store
//! state always yields the same report.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ledgerwise_shared::types::{growth_rate, percentage_of, round_money};
use rust_decimal::Decimal;

use super::types::{
    BudgetAnalysis, BudgetAnalysisRow, BudgetAnalysisSummary, CategoryLine, ExpenseBreakdown,
    ExpenseBreakdownSummary, ExpenseCategory, IncomeStatement, IncomeStatementSummary,
    MonthPeriod, MonthlyGrowth, MonthlySummary, MonthlyTotals, QuickStats, ReportKind,
    TrendAnalysis, TrendMonth, TrendSummary,
};
use super::window::{DateRange, RelativeWindow, month_name};
use crate::budget::{Budget, BudgetStatus, BudgetUsage};
use crate::ledger::TransactionType;
use crate::store::{CategoryTotal, DailyTotal, MonthlyTotal};

/// Number of rows in a monthly summary's top list.
pub const TOP_CATEGORY_LIMIT: usize = 10;

/// Largest total first; ties broken by name so output is stable.
fn by_total_desc(a: &CategoryTotal, b: &CategoryTotal) -> Ordering {
    b.total_amount
        .cmp(&a.total_amount)
        .then_with(|| a.category_name.cmp(&b.category_name))
}

fn average(total: Decimal, count: u64) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        round_money(total / Decimal::from(count))
    }
}

impl From<&CategoryTotal> for CategoryLine {
    fn from(row: &CategoryTotal) -> Self {
        Self {
            category_id: row.category_id,
            category_name: row.category_name.clone(),
            category_icon: row.category_icon.clone(),
            transaction_type: row.transaction_type,
            total_amount: row.total_amount,
            transaction_count: row.transaction_count,
        }
    }
}

/// Builds an income statement from (category, type) totals.
#[must_use]
pub fn income_statement(period: DateRange, mut rows: Vec<CategoryTotal>) -> IncomeStatement {
    rows.sort_by(by_total_desc);

    let (income, expenses): (Vec<_>, Vec<_>) = rows
        .iter()
        .partition(|r| r.transaction_type == TransactionType::Income);

    let total_income: Decimal = income.iter().map(|r| r.total_amount).sum();
    let total_expenses: Decimal = expenses.iter().map(|r| r.total_amount).sum();

    IncomeStatement {
        title: ReportKind::IncomeStatement.title().to_string(),
        period,
        income: income.into_iter().map(CategoryLine::from).collect(),
        expenses: expenses.into_iter().map(CategoryLine::from).collect(),
        summary: IncomeStatementSummary {
            total_income,
            total_expenses,
            net_income: total_income - total_expenses,
        },
    }
}

/// Builds an expense breakdown from (category, type) totals; income rows are ignored.
#[must_use]
pub fn expense_breakdown(period: DateRange, mut rows: Vec<CategoryTotal>) -> ExpenseBreakdown {
    rows.retain(|r| r.transaction_type == TransactionType::Expense);
    rows.sort_by(by_total_desc);

    let total_expenses: Decimal = rows.iter().map(|r| r.total_amount).sum();

    let categories: Vec<ExpenseCategory> = rows
        .into_iter()
        .map(|r| ExpenseCategory {
            avg_amount: average(r.total_amount, r.transaction_count),
            percentage: percentage_of(r.total_amount, total_expenses),
            category_id: r.category_id,
            category_name: r.category_name,
            category_icon: r.category_icon,
            category_color: r.category_color,
            total_amount: r.total_amount,
            transaction_count: r.transaction_count,
            min_amount: r.min_amount,
            max_amount: r.max_amount,
        })
        .collect();

    let category_count = categories.len();
    ExpenseBreakdown {
        title: ReportKind::ExpenseBreakdown.title().to_string(),
        period,
        summary: ExpenseBreakdownSummary {
            total_expenses,
            category_count,
            highest_category: categories.first().cloned(),
            avg_per_category: average(total_expenses, category_count as u64),
        },
        categories,
    }
}

/// Builds a budget analysis from budgets and their spending inside the window.
#[must_use]
pub fn budget_analysis(window: RelativeWindow, measured: Vec<(Budget, Decimal)>) -> BudgetAnalysis {
    let mut summary = BudgetAnalysisSummary {
        total_budgets: measured.len(),
        ..BudgetAnalysisSummary::default()
    };

    let mut budgets: Vec<BudgetAnalysisRow> = measured
        .into_iter()
        .map(|(budget, spent)| {
            let usage = BudgetUsage::for_budget(&budget, spent);
            summary.total_allocated += budget.budget_amount;
            summary.total_spent += spent;
            match usage.status {
                BudgetStatus::OnTrack => summary.on_track += 1,
                BudgetStatus::Warning => summary.warning += 1,
                BudgetStatus::OverBudget => summary.over_budget += 1,
            }
            BudgetAnalysisRow {
                budget_id: budget.id,
                category_name: budget.category_name,
                category_icon: budget.category_icon,
                category_color: budget.category_color,
                budget_amount: budget.budget_amount,
                period: budget.period,
                alert_threshold: budget.alert_threshold,
                actual_spending: spent,
                remaining_budget: usage.remaining_amount,
                usage_percentage: usage.usage_percentage,
                status: usage.status,
            }
        })
        .collect();

    budgets.sort_by(|a, b| {
        b.usage_percentage
            .cmp(&a.usage_percentage)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    BudgetAnalysis {
        title: ReportKind::BudgetAnalysis.title().to_string(),
        period: window,
        budgets,
        summary,
    }
}

/// Income, expense and count totals over (category, type) rows.
#[must_use]
pub fn monthly_totals(rows: &[CategoryTotal]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for row in rows {
        match row.transaction_type {
            TransactionType::Income => totals.income += row.total_amount,
            TransactionType::Expense => totals.expenses += row.total_amount,
        }
        totals.transaction_count += row.transaction_count;
    }
    totals.net = totals.income - totals.expenses;
    totals.avg_transaction = average(totals.income + totals.expenses, totals.transaction_count);
    totals
}

/// Builds a monthly summary.
#[must_use]
pub fn monthly_summary(
    period: MonthPeriod,
    mut rows: Vec<CategoryTotal>,
    mut daily: Vec<DailyTotal>,
) -> MonthlySummary {
    let summary = monthly_totals(&rows);

    rows.sort_by(by_total_desc);
    daily.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.transaction_type.cmp(&b.transaction_type))
    });

    MonthlySummary {
        title: ReportKind::MonthlySummary.title().to_string(),
        period,
        summary,
        daily_breakdown: daily,
        top_categories: rows
            .iter()
            .take(TOP_CATEGORY_LIMIT)
            .map(CategoryLine::from)
            .collect(),
    }
}

/// Builds a trend analysis from (category, type, month) totals.
#[must_use]
pub fn trend_analysis(months: u32, rows: &[MonthlyTotal]) -> TrendAnalysis {
    let mut by_month: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        let (income, expenses) = by_month.entry((row.year, row.month)).or_default();
        match row.transaction_type {
            TransactionType::Income => *income += row.total_amount,
            TransactionType::Expense => *expenses += row.total_amount,
        }
    }

    // Oldest first while computing growth against the previous month.
    let mut monthly_data: Vec<TrendMonth> = Vec::with_capacity(by_month.len());
    for ((year, month), (income, expenses)) in by_month {
        let (income_growth, expenses_growth) = monthly_data.last().map_or(
            (Decimal::ZERO, Decimal::ZERO),
            |prev: &TrendMonth| {
                (
                    growth_rate(prev.income, income),
                    growth_rate(prev.expenses, expenses),
                )
            },
        );
        monthly_data.push(TrendMonth {
            year,
            month,
            month_name: format!("{} {year}", month_name(month)),
            income,
            expenses,
            net: income - expenses,
            income_growth,
            expenses_growth,
        });
    }

    let mut summary = TrendSummary::default();
    if let (Some(oldest), Some(newest)) = (monthly_data.first(), monthly_data.last()) {
        summary.growth_rate_income = growth_rate(oldest.income, newest.income);
        summary.growth_rate_expenses = growth_rate(oldest.expenses, newest.expenses);
    }
    let count = monthly_data.len() as u64;
    summary.avg_monthly_income = average(monthly_data.iter().map(|m| m.income).sum(), count);
    summary.avg_monthly_expenses = average(monthly_data.iter().map(|m| m.expenses).sum(), count);

    monthly_data.reverse();

    // First occurrence wins, scanning newest first.
    for month in &monthly_data {
        if summary.best_month.as_ref().is_none_or(|b| month.net > b.net) {
            summary.best_month = Some(month.clone());
        }
        if summary.worst_month.as_ref().is_none_or(|w| month.net < w.net) {
            summary.worst_month = Some(month.clone());
        }
    }

    TrendAnalysis {
        title: ReportKind::TrendAnalysis.title().to_string(),
        period: format!("{months} months"),
        monthly_data,
        summary,
    }
}

/// Compares this month's totals with last month's.
#[must_use]
pub fn quick_stats(current_month: MonthlyTotals, last_month: MonthlyTotals) -> QuickStats {
    let growth = MonthlyGrowth {
        income: growth_rate(last_month.income, current_month.income),
        expenses: growth_rate(last_month.expenses, current_month.expenses),
        net: growth_rate(last_month.net, current_month.net),
    };
    QuickStats {
        current_month,
        last_month,
        growth,
    }
}
