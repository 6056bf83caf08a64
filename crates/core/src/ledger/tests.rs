use std::sync::Arc;

use ledgerwise_shared::AppError;
use ledgerwise_shared::types::{MAX_AMOUNT, UserId};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::budget::{AlertService, BudgetService, CreateBudgetInput};
use crate::store::{LedgerStore, MemoryLedgerStore, TransactionFilter};
use crate::testing::{Fixture, date};

fn recorder(fx: &Fixture) -> TransactionRecorder<MemoryLedgerStore> {
    TransactionRecorder::new(
        Arc::clone(&fx.store),
        AlertService::new(Arc::clone(&fx.store)).with_currency_symbol("KSH"),
    )
}

fn spend(fx: &Fixture, category: &Category, amount: Decimal, day: u32) -> NewTransaction {
    NewTransaction {
        user_id: fx.user,
        category_id: category.id,
        transaction_type: TransactionType::Expense,
        amount,
        description: "Weekly shop".to_string(),
        transaction_date: date(2024, 1, day),
        payment_method: None,
        reference_number: None,
        notes: None,
        status: None,
    }
}

async fn january_budget(fx: &Fixture) {
    BudgetService::new(Arc::clone(&fx.store))
        .create(
            fx.user,
            CreateBudgetInput {
                category_id: fx.groceries.id,
                budget_amount: dec!(1000),
                period: "monthly".to_string(),
                start_date: date(2024, 1, 1),
                end_date: date(2024, 1, 31),
                alert_threshold: None,
            },
        )
        .await
        .unwrap();
}

#[test]
fn test_category_type_support() {
    assert!(CategoryType::Both.supports(TransactionType::Income));
    assert!(CategoryType::Both.supports(TransactionType::Expense));
    assert!(CategoryType::Expense.supports(TransactionType::Expense));
    assert!(!CategoryType::Expense.supports(TransactionType::Income));
    assert!(!CategoryType::Income.supports(TransactionType::Expense));
}

#[test]
fn test_transaction_type_parse() {
    assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
    assert_eq!("expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
    assert!("transfer".parse::<TransactionType>().is_err());
}

#[tokio::test]
async fn test_record_applies_defaults() {
    let fx = Fixture::new();
    let mut input = spend(&fx, &fx.groceries, dec!(12.345), 4);
    input.description = "  Milk  ".to_string();

    let recorded = recorder(&fx).record(input).await.unwrap();
    let tx = recorded.transaction;
    assert_eq!(tx.amount, dec!(12.35));
    assert_eq!(tx.description, "Milk");
    assert_eq!(tx.payment_method, "cash");
    assert_eq!(tx.status, TransactionStatus::Completed);
    assert!(recorded.notification.is_none());

    let stored = fx
        .store
        .sum_amount(&TransactionFilter::for_user(fx.user))
        .await
        .unwrap();
    assert_eq!(stored, dec!(12.35));
}

#[rstest]
#[case(dec!(0))]
#[case(dec!(-5))]
#[case(dec!(0.001))]
#[tokio::test]
async fn test_record_rejects_non_positive_amount(#[case] amount: Decimal) {
    let fx = Fixture::new();
    let err = recorder(&fx)
        .record(spend(&fx, &fx.groceries, amount, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::InvalidAmount));
    assert!(matches!(AppError::from(err), AppError::Validation(_)));
}

#[tokio::test]
async fn test_record_rejects_amount_beyond_column() {
    let fx = Fixture::new();
    let err = recorder(&fx)
        .record(spend(&fx, &fx.groceries, dec!(10000000000000), 4))
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::AmountTooLarge));
    assert!(matches!(AppError::from(err), AppError::Validation(_)));

    let recorded = recorder(&fx)
        .record(spend(&fx, &fx.groceries, MAX_AMOUNT, 4))
        .await
        .unwrap();
    assert_eq!(recorded.transaction.amount, MAX_AMOUNT);
}

#[tokio::test]
async fn test_record_requires_description() {
    let fx = Fixture::new();
    let mut input = spend(&fx, &fx.groceries, dec!(10), 4);
    input.description = "   ".to_string();
    let err = recorder(&fx).record(input).await.unwrap_err();
    assert_eq!(err.to_string(), "Description is required");
}

#[tokio::test]
async fn test_record_rejects_incompatible_category() {
    let fx = Fixture::new();
    let err = recorder(&fx)
        .record(spend(&fx, &fx.salary, dec!(10), 4))
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::IncompatibleCategory));

    let mut income = spend(&fx, &fx.transport, dec!(10), 4);
    income.transaction_type = TransactionType::Income;
    assert!(recorder(&fx).record(income).await.is_ok());
}

#[tokio::test]
async fn test_record_rejects_foreign_category() {
    let fx = Fixture::new();
    let mut input = spend(&fx, &fx.groceries, dec!(10), 4);
    input.user_id = UserId::new();
    let err = recorder(&fx).record(input).await.unwrap_err();
    assert!(matches!(AppError::from(err), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_record_raises_alert_after_commit() {
    let fx = Fixture::new();
    january_budget(&fx).await;
    let recorder = recorder(&fx);

    let quiet = recorder.record(spend(&fx, &fx.groceries, dec!(500), 2)).await.unwrap();
    assert!(quiet.notification.is_none());

    let near = recorder.record(spend(&fx, &fx.groceries, dec!(350), 3)).await.unwrap();
    let note = near.notification.unwrap();
    assert_eq!(note.kind, NotificationKind::BudgetAlert);
    assert_eq!(note.priority, NotificationPriority::Medium);
    assert_eq!(note.related_id, Some(near.transaction.id));

    let over = recorder.record(spend(&fx, &fx.groceries, dec!(200), 4)).await.unwrap();
    let note = over.notification.unwrap();
    assert_eq!(note.title, "Budget Exceeded");
    assert_eq!(
        note.message,
        "Budget exceeded! You have spent KSH 1,050.00 out of KSH 1,000.00"
    );
}

#[tokio::test]
async fn test_notification_failure_keeps_transaction() {
    let fx = Fixture::new();
    january_budget(&fx).await;
    fx.store.fail_notifications(true);

    let recorded = recorder(&fx)
        .record(spend(&fx, &fx.groceries, dec!(1500), 10))
        .await
        .unwrap();
    assert!(recorded.notification.is_none());
    assert!(fx.store.notifications(fx.user).is_empty());

    let spent = fx
        .store
        .sum_amount(&TransactionFilter::for_user(fx.user).category(fx.groceries.id))
        .await
        .unwrap();
    assert_eq!(spent, dec!(1500));
}

#[tokio::test]
async fn test_record_fails_when_store_is_down() {
    let fx = Fixture::new();
    fx.store.set_unavailable(true);
    let err = recorder(&fx)
        .record(spend(&fx, &fx.groceries, dec!(10), 4))
        .await
        .unwrap_err();
    assert!(matches!(AppError::from(err), AppError::Persistence(_)));
}
