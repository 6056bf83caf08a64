use std::sync::Arc;

use ledgerwise_shared::types::CategoryId;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::{spending_patterns, suggested_amount};
use super::*;
use crate::budget::{BudgetPeriod, BudgetService, CreateBudgetInput};
use crate::ledger::TransactionType;
use crate::store::MonthlyTotal;
use crate::testing::{Fixture, date};

fn row(category_id: CategoryId, name: &str, month: u32, total: Decimal) -> MonthlyTotal {
    MonthlyTotal {
        category_id,
        category_name: name.to_string(),
        transaction_type: TransactionType::Expense,
        year: 2024,
        month,
        total_amount: total,
        transaction_count: 1,
    }
}

#[rstest]
#[case(dec!(1000), dec!(1200))]
#[case(dec!(333.33), dec!(400))]
#[case(dec!(0.01), dec!(1))]
fn test_suggested_amount_rounds_up(#[case] avg: Decimal, #[case] expected: Decimal) {
    assert_eq!(suggested_amount(avg), expected);
}

#[test]
fn test_patterns_average_months_with_spending() {
    let food = CategoryId::new();
    let fuel = CategoryId::new();
    let rows = vec![
        row(food, "Food", 1, dec!(900)),
        row(food, "Food", 3, dec!(1100)),
        row(fuel, "Fuel", 2, dec!(5000)),
    ];

    let patterns = spending_patterns(&rows);
    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[0].category_name, "Fuel");

    let food = &patterns[1];
    assert_eq!(food.months_with_spending, 2);
    assert_eq!(food.avg_monthly_spending, dec!(1000));
    assert_eq!(food.max_monthly_spending, dec!(1100));
    assert_eq!(food.suggested_amount, dec!(1200));
}

#[test]
fn test_patterns_ignore_income_rows() {
    let mut income = row(CategoryId::new(), "Salary", 1, dec!(50000));
    income.transaction_type = TransactionType::Income;
    assert!(spending_patterns(&[income]).is_empty());
}

#[rstest]
#[case(0)]
#[case(13)]
#[tokio::test]
async fn test_lookback_out_of_range_rejected(#[case] months: u32) {
    let fx = Fixture::new();
    let inference = BudgetInference::new(Arc::clone(&fx.store));
    let err = inference
        .infer_as_of(fx.user, months, date(2024, 7, 15))
        .await
        .unwrap_err();
    assert!(matches!(err, InferenceError::InvalidLookback(m) if m == months));
}

#[tokio::test]
async fn test_infer_creates_current_month_budget() {
    let fx = Fixture::new();
    fx.expense(&fx.groceries, dec!(600), date(2024, 5, 3));
    fx.expense(&fx.groceries, dec!(400), date(2024, 5, 20));
    fx.expense(&fx.groceries, dec!(1000), date(2024, 6, 9));
    // Outside a three month lookback from mid-July.
    fx.expense(&fx.groceries, dec!(9000), date(2024, 4, 1));

    let inference = BudgetInference::new(Arc::clone(&fx.store));
    let outcome = inference
        .infer_as_of(fx.user, 3, date(2024, 7, 15))
        .await
        .unwrap();

    assert_eq!(outcome.created_count, 1);
    assert_eq!(
        outcome.message(),
        "Created 1 automatic budgets based on spending patterns"
    );
    let budget = &outcome.created[0];
    assert_eq!(budget.budget_amount, dec!(1200));
    assert_eq!(budget.period, BudgetPeriod::Monthly);
    assert_eq!(budget.alert_threshold, dec!(80));
    assert_eq!(budget.start_date, date(2024, 7, 1));
    assert_eq!(budget.end_date, date(2024, 7, 31));
    assert_eq!(outcome.patterns[0].months_with_spending, 2);
}

#[tokio::test]
async fn test_second_run_skips_existing() {
    let fx = Fixture::new();
    fx.expense(&fx.groceries, dec!(1000), date(2024, 6, 9));
    let inference = BudgetInference::new(Arc::clone(&fx.store));

    let first = inference.infer_as_of(fx.user, 6, date(2024, 7, 15)).await.unwrap();
    assert_eq!(first.created_count, 1);

    let second = inference.infer_as_of(fx.user, 6, date(2024, 7, 20)).await.unwrap();
    assert_eq!(second.created_count, 0);
    assert_eq!(second.skipped.len(), 1);
    assert_eq!(second.skipped[0].category_id, fx.groceries.id);
    assert_eq!(fx.store.budgets(fx.user).len(), 1);
}

#[tokio::test]
async fn test_overlapping_budget_recorded_as_failure() {
    let fx = Fixture::new();
    fx.expense(&fx.groceries, dec!(500), date(2024, 6, 9));
    fx.expense(&fx.transport, dec!(200), date(2024, 6, 10));
    BudgetService::new(Arc::clone(&fx.store))
        .create(
            fx.user,
            CreateBudgetInput {
                category_id: fx.groceries.id,
                budget_amount: dec!(700),
                period: "monthly".to_string(),
                start_date: date(2024, 7, 10),
                end_date: date(2024, 8, 10),
                alert_threshold: None,
            },
        )
        .await
        .unwrap();

    let outcome = BudgetInference::new(Arc::clone(&fx.store))
        .infer_as_of(fx.user, 6, date(2024, 7, 15))
        .await
        .unwrap();

    assert_eq!(outcome.created_count, 1);
    assert_eq!(outcome.created[0].category_id, fx.transport.id);
    assert_eq!(outcome.created[0].budget_amount, dec!(240));
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(
        outcome.failed[0].reason,
        "Budget already exists for this category and period"
    );
}

#[tokio::test]
async fn test_no_history_creates_nothing() {
    let fx = Fixture::new();
    let patterns = BudgetInference::new(Arc::clone(&fx.store))
        .patterns_as_of(fx.user, 6, date(2024, 7, 15))
        .await
        .unwrap();
    assert!(patterns.is_empty());
}
