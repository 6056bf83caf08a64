//! Report export to CSV and JSON files.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use super::window;
use super::types::{
    BudgetAnalysis, ExpenseBreakdown, IncomeStatement, MonthlySummary, Report, TrendAnalysis,
};

/// Timestamp written in the CSV header block.
const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp embedded in export file names.
const FILENAME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Sectioned CSV.
    #[default]
    Csv,
    /// Pretty-printed JSON.
    Json,
}

impl ExportFormat {
    /// File extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ReportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Location of a written export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedFile {
    /// Path on disk.
    pub filepath: PathBuf,
    /// File name.
    pub filename: String,
    /// Download URL relative to the web root.
    pub url: String,
}

/// Writes reports into the export directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    export_dir: PathBuf,
    url_prefix: String,
}

impl ReportExporter {
    /// Create an exporter writing into `export_dir`, served under `url_prefix`.
    #[must_use]
    pub fn new(export_dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            export_dir: export_dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// Exports `report`, stamped with the current UTC time.
    pub async fn export(
        &self,
        report: &Report,
        format: ExportFormat,
    ) -> Result<ExportedFile, ReportError> {
        self.export_at(report, format, window::now())
            .await
    }

    /// Exports `report` as if generated at `generated_at`.
    ///
    /// CSV files are named `report_<timestamp>.csv`, JSON files
    /// `report_<kind>_<timestamp>.json`.
    pub async fn export_at(
        &self,
        report: &Report,
        format: ExportFormat,
        generated_at: NaiveDateTime,
    ) -> Result<ExportedFile, ReportError> {
        let stamp = generated_at.format(FILENAME_FORMAT);
        let (filename, contents) = match format {
            ExportFormat::Csv => (format!("report_{stamp}.csv"), to_csv(report, generated_at)?),
            ExportFormat::Json => (
                format!("report_{}_{stamp}.json", report.kind()),
                to_json(report)?.into_bytes(),
            ),
        };

        tokio::fs::create_dir_all(&self.export_dir).await?;
        let filepath = self.export_dir.join(&filename);
        tokio::fs::write(&filepath, contents).await?;

        let url = if self.url_prefix.is_empty() {
            filename.clone()
        } else {
            format!("{}/{filename}", self.url_prefix.trim_end_matches('/'))
        };

        tracing::info!(path = %filepath.display(), kind = %report.kind(), %format, "report exported");
        Ok(ExportedFile {
            filepath,
            filename,
            url,
        })
    }
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Serializes a report as sectioned CSV.
///
/// Section order is fixed: header, period, summary, body.
pub fn to_csv(report: &Report, generated_at: NaiveDateTime) -> Result<Vec<u8>, ReportError> {
    let mut out = CsvSections::new();

    out.row([format!("Report: {}", report.title())])?;
    out.row([format!("Generated: {}", generated_at.format(GENERATED_FORMAT))])?;
    out.blank();

    for (key, value) in period_rows(report) {
        out.row([key, value])?;
    }
    out.blank();

    out.row(["SUMMARY"])?;
    for (key, value) in summary_rows(report) {
        out.row([title_case(key), value])?;
    }
    out.blank();

    match report {
        Report::IncomeStatement(r) => income_statement_body(&mut out, r)?,
        Report::ExpenseBreakdown(r) => expense_breakdown_body(&mut out, r)?,
        Report::BudgetAnalysis(r) => budget_analysis_body(&mut out, r)?,
        Report::MonthlySummary(r) => monthly_summary_body(&mut out, r)?,
        Report::TrendAnalysis(r) => trend_analysis_body(&mut out, r)?,
    }

    Ok(out.finish())
}

/// CSV buffer that can also emit truly empty separator lines.
struct CsvSections {
    buf: Vec<u8>,
}

impl CsvSections {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn row<I, T>(&mut self, fields: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut self.buf);
        writer.write_record(fields)?;
        writer.flush()?;
        Ok(())
    }

    // An empty csv record is written as `""`; a separator must be bare.
    fn blank(&mut self) {
        self.buf.push(b'\n');
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

fn period_rows(report: &Report) -> Vec<(String, String)> {
    match report {
        Report::IncomeStatement(IncomeStatement { period, .. })
        | Report::ExpenseBreakdown(ExpenseBreakdown { period, .. }) => vec![
            (capitalize("start_date"), period.start_date.to_string()),
            (capitalize("end_date"), period.end_date.to_string()),
        ],
        Report::MonthlySummary(r) => vec![
            (capitalize("year"), r.period.year.to_string()),
            (capitalize("month"), r.period.month.to_string()),
            (capitalize("month_name"), r.period.month_name.clone()),
            (capitalize("start_date"), r.period.start_date.to_string()),
            (capitalize("end_date"), r.period.end_date.to_string()),
        ],
        Report::BudgetAnalysis(r) => vec![("Period".to_string(), r.period.to_string())],
        Report::TrendAnalysis(r) => vec![("Period".to_string(), r.period.clone())],
    }
}

fn summary_rows(report: &Report) -> Vec<(&'static str, String)> {
    match report {
        Report::IncomeStatement(r) => vec![
            ("total_income", r.summary.total_income.to_string()),
            ("total_expenses", r.summary.total_expenses.to_string()),
            ("net_income", r.summary.net_income.to_string()),
        ],
        Report::ExpenseBreakdown(r) => vec![
            ("total_expenses", r.summary.total_expenses.to_string()),
            ("category_count", r.summary.category_count.to_string()),
            (
                "highest_category",
                r.summary
                    .highest_category
                    .as_ref()
                    .map(|c| c.category_name.clone())
                    .unwrap_or_default(),
            ),
            ("avg_per_category", r.summary.avg_per_category.to_string()),
        ],
        Report::BudgetAnalysis(r) => vec![
            ("total_budgets", r.summary.total_budgets.to_string()),
            ("over_budget", r.summary.over_budget.to_string()),
            ("warning", r.summary.warning.to_string()),
            ("on_track", r.summary.on_track.to_string()),
            ("total_allocated", r.summary.total_allocated.to_string()),
            ("total_spent", r.summary.total_spent.to_string()),
        ],
        Report::MonthlySummary(r) => vec![
            ("income", r.summary.income.to_string()),
            ("expenses", r.summary.expenses.to_string()),
            ("net", r.summary.net.to_string()),
            ("transaction_count", r.summary.transaction_count.to_string()),
            ("avg_transaction", r.summary.avg_transaction.to_string()),
        ],
        Report::TrendAnalysis(r) => vec![
            ("avg_monthly_income", r.summary.avg_monthly_income.to_string()),
            ("avg_monthly_expenses", r.summary.avg_monthly_expenses.to_string()),
            ("growth_rate_income", r.summary.growth_rate_income.to_string()),
            ("growth_rate_expenses", r.summary.growth_rate_expenses.to_string()),
            (
                "best_month",
                r.summary
                    .best_month
                    .as_ref()
                    .map(|m| m.month_name.clone())
                    .unwrap_or_default(),
            ),
            (
                "worst_month",
                r.summary
                    .worst_month
                    .as_ref()
                    .map(|m| m.month_name.clone())
                    .unwrap_or_default(),
            ),
        ],
    }
}

fn income_statement_body(out: &mut CsvSections, report: &IncomeStatement) -> Result<(), ReportError> {
    if !report.income.is_empty() {
        out.row(["INCOME"])?;
        out.row(["Category", "Amount", "Transactions"])?;
        for line in &report.income {
            out.row([
                line.category_name.clone(),
                line.total_amount.to_string(),
                line.transaction_count.to_string(),
            ])?;
        }
        out.blank();
    }
    if !report.expenses.is_empty() {
        out.row(["EXPENSES"])?;
        out.row(["Category", "Amount", "Transactions"])?;
        for line in &report.expenses {
            out.row([
                line.category_name.clone(),
                line.total_amount.to_string(),
                line.transaction_count.to_string(),
            ])?;
        }
    }
    Ok(())
}

fn expense_breakdown_body(
    out: &mut CsvSections,
    report: &ExpenseBreakdown,
) -> Result<(), ReportError> {
    if report.categories.is_empty() {
        return Ok(());
    }
    out.row(["EXPENSE CATEGORIES"])?;
    out.row([
        "Category",
        "Total Amount",
        "Transactions",
        "Percentage",
        "Average",
        "Min",
        "Max",
    ])?;
    for c in &report.categories {
        out.row([
            c.category_name.clone(),
            c.total_amount.to_string(),
            c.transaction_count.to_string(),
            format!("{}%", c.percentage),
            c.avg_amount.to_string(),
            c.min_amount.to_string(),
            c.max_amount.to_string(),
        ])?;
    }
    Ok(())
}

fn budget_analysis_body(out: &mut CsvSections, report: &BudgetAnalysis) -> Result<(), ReportError> {
    if report.budgets.is_empty() {
        return Ok(());
    }
    out.row(["BUDGETS"])?;
    out.row(["Category", "Budget", "Spent", "Remaining", "Usage", "Status"])?;
    for b in &report.budgets {
        out.row([
            b.category_name.clone(),
            b.budget_amount.to_string(),
            b.actual_spending.to_string(),
            b.remaining_budget.to_string(),
            format!("{}%", b.usage_percentage),
            b.status.as_str().to_string(),
        ])?;
    }
    Ok(())
}

fn monthly_summary_body(out: &mut CsvSections, report: &MonthlySummary) -> Result<(), ReportError> {
    if report.top_categories.is_empty() {
        return Ok(());
    }
    out.row(["TOP CATEGORIES"])?;
    out.row(["Category", "Type", "Amount", "Transactions"])?;
    for line in &report.top_categories {
        out.row([
            line.category_name.clone(),
            capitalize(line.transaction_type.as_str()),
            line.total_amount.to_string(),
            line.transaction_count.to_string(),
        ])?;
    }
    Ok(())
}

fn trend_analysis_body(out: &mut CsvSections, report: &TrendAnalysis) -> Result<(), ReportError> {
    if report.monthly_data.is_empty() {
        return Ok(());
    }
    out.row(["MONTHLY DATA"])?;
    out.row(["Month", "Income", "Expenses", "Net"])?;
    for m in &report.monthly_data {
        out.row([
            m.month_name.clone(),
            m.income.to_string(),
            m.expenses.to_string(),
            m.net.to_string(),
        ])?;
    }
    Ok(())
}

/// Upper-cases the first character only: `start_date` -> `Start_date`.
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// `total_income` -> `Total Income`.
fn title_case(key: &str) -> String {
    key.split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_keeps_rest() {
        assert_eq!(capitalize("start_date"), "Start_date");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("total_income"), "Total Income");
        assert_eq!(title_case("net"), "Net");
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ReportError::InvalidFormat(_))
        ));
    }
}
