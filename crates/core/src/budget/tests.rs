//! Property-based and service tests for the budget module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::interval::BudgetInterval;
use super::usage::{BudgetStatus, BudgetUsage};
use crate::testing::date;

fn status_rank(status: BudgetStatus) -> u8 {
    match status {
        BudgetStatus::OnTrack => 0,
        BudgetStatus::Warning => 1,
        BudgetStatus::OverBudget => 2,
    }
}

proptest! {
    /// Two closed intervals overlap iff they share a day, whatever their nesting.
    #[test]
    fn test_overlap_matches_shared_day(
        s1 in 0u64..90, len1 in 1u64..60,
        s2 in 0u64..90, len2 in 1u64..60,
    ) {
        let base = date(2024, 1, 1);
        let a = BudgetInterval::new(
            base + chrono::Days::new(s1),
            base + chrono::Days::new(s1 + len1),
        ).unwrap();
        let b = BudgetInterval::new(
            base + chrono::Days::new(s2),
            base + chrono::Days::new(s2 + len2),
        ).unwrap();

        let shares_day = a
            .start_date()
            .iter_days()
            .take_while(|d| *d <= a.end_date())
            .any(|d| b.contains(d));

        prop_assert_eq!(a.overlaps(&b), shares_day);
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// Status never improves as spending grows.
    #[test]
    fn test_status_monotonic_in_spending(
        amount in 1i64..10_000_000,
        threshold in 0i64..=100,
        c1 in 0i64..20_000_000,
        c2 in 0i64..20_000_000,
    ) {
        let amount = Decimal::new(amount, 2);
        let threshold = Decimal::from(threshold);
        let (low, high) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };

        let low = BudgetStatus::classify(Decimal::new(low, 2), amount, threshold);
        let high = BudgetStatus::classify(Decimal::new(high, 2), amount, threshold);
        prop_assert!(status_rank(low) <= status_rank(high));
    }

    /// Usage arithmetic: remaining = amount - spent, percentage = spent / amount * 100.
    #[test]
    fn test_usage_arithmetic(
        amount in 1i64..10_000_000,
        spent in 0i64..20_000_000,
    ) {
        let amount = Decimal::new(amount, 2);
        let spent = Decimal::new(spent, 2);

        let usage = BudgetUsage::compute(amount, dec!(80), spent);
        prop_assert_eq!(usage.remaining_amount, amount - spent);
        prop_assert_eq!(usage.usage_percentage, (spent / amount * dec!(100)).round_dp(2));
        prop_assert_eq!(usage.status, BudgetStatus::classify(spent, amount, dec!(80)));
    }
}

mod unit_tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use ledgerwise_shared::types::{ApiResponse, BudgetId, CategoryId, MAX_AMOUNT, UserId, respond};
    use ledgerwise_shared::AppError;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::budget::{
        AlertService, AlertType, BUDGET_CREATED, BudgetError, BudgetPatch, BudgetPeriod,
        BudgetService, BudgetStatus, BudgetUsage, CreateBudgetInput,
    };
    use crate::ledger::{Category, NotificationPriority};
    use crate::testing::{Fixture, date};

    fn input(fx: &Fixture, amount: Decimal, start: (i32, u32, u32), end: (i32, u32, u32)) -> CreateBudgetInput {
        CreateBudgetInput {
            category_id: fx.groceries.id,
            budget_amount: amount,
            period: "monthly".to_string(),
            start_date: date(start.0, start.1, start.2),
            end_date: date(end.0, end.1, end.2),
            alert_threshold: None,
        }
    }

    fn january(fx: &Fixture) -> CreateBudgetInput {
        input(fx, dec!(1000), (2024, 1, 1), (2024, 1, 31))
    }

    #[rstest]
    #[case(dec!(0), BudgetStatus::OnTrack)]
    #[case(dec!(800), BudgetStatus::OnTrack)]
    #[case(dec!(800.10), BudgetStatus::Warning)]
    #[case(dec!(1000), BudgetStatus::Warning)]
    #[case(dec!(1000.10), BudgetStatus::OverBudget)]
    fn test_classify_at_default_threshold(#[case] spent: Decimal, #[case] expected: BudgetStatus) {
        assert_eq!(BudgetStatus::classify(spent, dec!(1000), dec!(80)), expected);
    }

    #[test]
    fn test_usage_example() {
        let usage = BudgetUsage::compute(dec!(1000), dec!(80), dec!(400));
        assert_eq!(usage.remaining_amount, dec!(600));
        assert_eq!(usage.usage_percentage, dec!(40.00));
        assert_eq!(usage.status, BudgetStatus::OnTrack);
    }

    #[test]
    fn test_usage_zero_budget_guarded() {
        let usage = BudgetUsage::compute(Decimal::ZERO, dec!(80), dec!(50));
        assert_eq!(usage.usage_percentage, Decimal::ZERO);
        assert_eq!(usage.status, BudgetStatus::OverBudget);
    }

    #[rstest]
    #[case("weekly", BudgetPeriod::Weekly)]
    #[case("monthly", BudgetPeriod::Monthly)]
    #[case("quarterly", BudgetPeriod::Quarterly)]
    #[case("yearly", BudgetPeriod::Yearly)]
    fn test_period_parse(#[case] label: &str, #[case] expected: BudgetPeriod) {
        assert_eq!(label.parse::<BudgetPeriod>().unwrap(), expected);
    }

    #[test]
    fn test_period_rejects_unknown_label() {
        assert!(matches!("daily".parse::<BudgetPeriod>(), Err(BudgetError::InvalidPeriod)));
    }

    #[tokio::test]
    async fn test_create_rejects_overlap_and_accepts_adjacent() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));

        service.create(fx.user, january(&fx)).await.unwrap();

        let overlapping = input(&fx, dec!(500), (2024, 1, 15), (2024, 2, 15));
        let err = service.create(fx.user, overlapping).await.unwrap_err();
        assert!(matches!(err, BudgetError::Overlap));
        assert_eq!(err.to_string(), "Budget already exists for this category and period");

        let february = input(&fx, dec!(500), (2024, 2, 1), (2024, 2, 29));
        assert!(service.create(fx.user, february).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_nested_interval() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        service.create(fx.user, january(&fx)).await.unwrap();

        let inner = input(&fx, dec!(100), (2024, 1, 10), (2024, 1, 12));
        assert!(matches!(
            service.create(fx.user, inner).await,
            Err(BudgetError::Overlap)
        ));
    }

    #[tokio::test]
    async fn test_other_period_label_does_not_conflict() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        service.create(fx.user, january(&fx)).await.unwrap();

        let mut weekly = input(&fx, dec!(200), (2024, 1, 1), (2024, 1, 7));
        weekly.period = "weekly".to_string();
        assert!(service.create(fx.user, weekly).await.is_ok());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-10))]
    #[case(dec!(0.004))]
    #[tokio::test]
    async fn test_create_rejects_non_positive_amount(#[case] amount: Decimal) {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let err = service
            .create(fx.user, input(&fx, amount, (2024, 1, 1), (2024, 1, 31)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Budget amount must be a positive number");
    }

    #[tokio::test]
    async fn test_create_rejects_amount_beyond_column() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));

        let err = service
            .create(
                fx.user,
                input(&fx, dec!(1000000000000000000000000000), (2024, 1, 1), (2024, 1, 31)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BudgetError::AmountTooLarge));
        assert!(matches!(AppError::from(err), AppError::Validation(_)));

        let created = service
            .create(fx.user, input(&fx, MAX_AMOUNT, (2024, 1, 1), (2024, 1, 31)))
            .await
            .unwrap();
        fx.expense(&fx.groceries, dec!(500), date(2024, 1, 10));
        let read = service.get(fx.user, created.budget.id).await.unwrap();
        assert_eq!(read.usage.status, BudgetStatus::OnTrack);
        assert_eq!(read.usage.current_spending, dec!(500));

        let err = service
            .update(
                fx.user,
                created.budget.id,
                BudgetPatch {
                    budget_amount: Some(MAX_AMOUNT + dec!(0.01)),
                    ..BudgetPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BudgetError::AmountTooLarge));
    }

    #[test]
    fn test_usage_saturates_near_decimal_max() {
        assert_eq!(
            BudgetStatus::classify(dec!(1), Decimal::MAX, dec!(80)),
            BudgetStatus::OnTrack
        );
        let usage = BudgetUsage::compute(Decimal::MAX, dec!(80), Decimal::MAX);
        assert_eq!(usage.status, BudgetStatus::Warning);
        assert_eq!(usage.usage_percentage, dec!(100));
        assert_eq!(usage.remaining_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_create_validates_period_and_dates() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));

        let mut bad_period = january(&fx);
        bad_period.period = "fortnightly".to_string();
        assert!(matches!(
            service.create(fx.user, bad_period).await,
            Err(BudgetError::InvalidPeriod)
        ));

        let same_day = input(&fx, dec!(10), (2024, 1, 1), (2024, 1, 1));
        let err = service.create(fx.user, same_day).await.unwrap_err();
        assert_eq!(err.to_string(), "End date must be after start date");
    }

    #[tokio::test]
    async fn test_create_rounds_amount_and_clamps_threshold() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));

        let mut req = input(&fx, dec!(100.555), (2024, 1, 1), (2024, 1, 31));
        req.alert_threshold = Some(dec!(150));
        let created = service.create(fx.user, req).await.unwrap();
        assert_eq!(created.budget.budget_amount, dec!(100.56));
        assert_eq!(created.budget.alert_threshold, dec!(100));
        assert_eq!(created.budget.category_name, "Groceries");

        let mut req = input(&fx, dec!(50), (2024, 3, 1), (2024, 3, 31));
        req.alert_threshold = Some(dec!(-5));
        let created = service.create(fx.user, req).await.unwrap();
        assert_eq!(created.budget.alert_threshold, Decimal::ZERO);

        let created = service
            .create(fx.user, input(&fx, dec!(50), (2024, 5, 1), (2024, 5, 31)))
            .await
            .unwrap();
        assert_eq!(created.budget.alert_threshold, dec!(80));
    }

    #[tokio::test]
    async fn test_configured_default_threshold() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store)).with_default_threshold(dec!(90));
        let created = service.create(fx.user, january(&fx)).await.unwrap();
        assert_eq!(created.budget.alert_threshold, dec!(90));
    }

    #[tokio::test]
    async fn test_create_rejects_foreign_and_inactive_category() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));

        let stranger = UserId::new();
        assert!(matches!(
            service.create(stranger, january(&fx)).await,
            Err(BudgetError::InvalidCategory)
        ));

        let archived = Category {
            is_active: false,
            id: CategoryId::new(),
            name: "Archived".to_string(),
            ..fx.groceries.clone()
        };
        fx.store.insert_category(archived.clone());
        let mut req = january(&fx);
        req.category_id = archived.id;
        let err = service.create(fx.user, req).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid category");
        assert!(matches!(AppError::from(err), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_is_user_scoped() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let created = service.create(fx.user, january(&fx)).await.unwrap();

        assert!(service.get(fx.user, created.budget.id).await.is_ok());
        assert!(matches!(
            service.get(UserId::new(), created.budget.id).await,
            Err(BudgetError::NotFound)
        ));
        assert!(matches!(
            service.get(fx.user, BudgetId::new()).await,
            Err(BudgetError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_usage_counts_only_matching_expenses() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let created = service.create(fx.user, january(&fx)).await.unwrap();

        fx.expense(&fx.groceries, dec!(300), date(2024, 1, 1));
        fx.expense(&fx.groceries, dec!(100), date(2024, 1, 31));
        fx.expense(&fx.groceries, dec!(999), date(2024, 2, 1));
        fx.expense(&fx.transport, dec!(999), date(2024, 1, 10));
        let deleted = fx.expense(&fx.groceries, dec!(999), date(2024, 1, 10));
        fx.store.delete_transaction(deleted.id);
        fx.store.add_transaction(
            UserId::new(),
            fx.groceries.id,
            crate::ledger::TransactionType::Expense,
            dec!(999),
            date(2024, 1, 10),
        );

        let fetched = service.get(fx.user, created.budget.id).await.unwrap();
        assert_eq!(fetched.usage.current_spending, dec!(400));
        assert_eq!(fetched.usage.remaining_amount, dec!(600));
        assert_eq!(fetched.usage.usage_percentage, dec!(40.00));
        assert_eq!(fetched.usage.status, BudgetStatus::OnTrack);
    }

    #[tokio::test]
    async fn test_update_empty_patch_rejected() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let created = service.create(fx.user, january(&fx)).await.unwrap();

        let err = service
            .update(fx.user, created.budget.id, BudgetPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No valid fields to update");
    }

    #[tokio::test]
    async fn test_update_rechecks_overlap_excluding_itself() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let jan = service.create(fx.user, january(&fx)).await.unwrap();
        service
            .create(fx.user, input(&fx, dec!(500), (2024, 2, 1), (2024, 2, 29)))
            .await
            .unwrap();

        let shrink = BudgetPatch {
            end_date: Some(date(2024, 1, 20)),
            ..BudgetPatch::default()
        };
        let updated = service.update(fx.user, jan.budget.id, shrink).await.unwrap();
        assert_eq!(updated.budget.end_date, date(2024, 1, 20));

        let stretch = BudgetPatch {
            end_date: Some(date(2024, 2, 10)),
            ..BudgetPatch::default()
        };
        assert!(matches!(
            service.update(fx.user, jan.budget.id, stretch).await,
            Err(BudgetError::Overlap)
        ));
    }

    #[tokio::test]
    async fn test_update_validates_merged_interval_and_fields() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let jan = service.create(fx.user, january(&fx)).await.unwrap();

        let backwards = BudgetPatch {
            start_date: Some(date(2024, 2, 15)),
            ..BudgetPatch::default()
        };
        assert!(matches!(
            service.update(fx.user, jan.budget.id, backwards).await,
            Err(BudgetError::InvalidDateRange)
        ));

        let negative = BudgetPatch {
            budget_amount: Some(dec!(-1)),
            ..BudgetPatch::default()
        };
        assert!(matches!(
            service.update(fx.user, jan.budget.id, negative).await,
            Err(BudgetError::InvalidAmount)
        ));

        let patch = BudgetPatch {
            budget_amount: Some(dec!(1500.499)),
            alert_threshold: Some(dec!(120)),
            ..BudgetPatch::default()
        };
        let updated = service.update(fx.user, jan.budget.id, patch).await.unwrap();
        assert_eq!(updated.budget.budget_amount, dec!(1500.50));
        assert_eq!(updated.budget.alert_threshold, dec!(100));
    }

    #[tokio::test]
    async fn test_delete_is_soft_and_scoped() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let jan = service.create(fx.user, january(&fx)).await.unwrap();

        assert!(matches!(
            service.delete(UserId::new(), jan.budget.id).await,
            Err(BudgetError::NotFound)
        ));
        service.delete(fx.user, jan.budget.id).await.unwrap();
        assert!(matches!(
            service.delete(fx.user, jan.budget.id).await,
            Err(BudgetError::NotFound)
        ));

        let stored = fx.store.budgets(fx.user);
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].is_active);

        // The deactivated interval is free again.
        assert!(service.create(fx.user, january(&fx)).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_for_user_newest_first() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let older = service.create(fx.user, january(&fx)).await.unwrap();
        let newer = service
            .create(fx.user, input(&fx, dec!(10), (2024, 2, 1), (2024, 2, 29)))
            .await
            .unwrap();
        fx.store
            .set_budget_created_at(older.budget.id, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        fx.store
            .set_budget_created_at(newer.budget.id, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());

        let listed = service.get_for_user(fx.user, None, true).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|b| b.budget.id).collect();
        assert_eq!(ids, vec![newer.budget.id, older.budget.id]);

        let weekly = service
            .get_for_user(fx.user, Some(BudgetPeriod::Weekly), true)
            .await
            .unwrap();
        assert!(weekly.is_empty());
    }

    #[tokio::test]
    async fn test_usage_statistics() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        service.create(fx.user, january(&fx)).await.unwrap();
        let mut transport = input(&fx, dec!(100), (2024, 1, 1), (2024, 1, 31));
        transport.category_id = fx.transport.id;
        service.create(fx.user, transport).await.unwrap();

        fx.expense(&fx.groceries, dec!(900), date(2024, 1, 5));
        fx.expense(&fx.transport, dec!(150), date(2024, 1, 5));

        let stats = service.usage_statistics(fx.user, None).await.unwrap();
        assert_eq!(stats.total_budgets, 2);
        assert_eq!(stats.total_allocated, dec!(1100));
        assert_eq!(stats.total_spent, dec!(1050));
        assert_eq!(stats.total_remaining, dec!(50));
        assert_eq!(stats.overall_usage, dec!(95.45));
        assert_eq!((stats.on_track, stats.warning, stats.over_budget), (0, 1, 1));
        assert_eq!(stats.categories.len(), 2);
    }

    #[tokio::test]
    async fn test_respond_maps_errors_to_envelope() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));

        let ok = respond(service.create(fx.user, january(&fx)).await, BUDGET_CREATED);
        assert!(ok.success);
        assert_eq!(ok.message.as_deref(), Some("Budget created successfully"));

        let conflict = respond(service.create(fx.user, january(&fx)).await, "unused");
        assert!(!conflict.success);
        assert_eq!(conflict.code.as_deref(), Some("CONFLICT"));
        assert_eq!(
            conflict.message.as_deref(),
            Some("Budget already exists for this category and period")
        );

        fx.store.set_unavailable(true);
        let down: ApiResponse<_> = respond(service.get_for_user(fx.user, None, true).await, "unused");
        assert_eq!(down.code.as_deref(), Some("PERSISTENCE_ERROR"));
        assert!(!down.message.unwrap_or_default().contains("offline"));
    }

    #[tokio::test]
    async fn test_preview_without_budget_is_none() {
        let fx = Fixture::new();
        let alerts = AlertService::new(Arc::clone(&fx.store));
        let impact = alerts
            .preview_transaction_impact(fx.user, fx.groceries.id, dec!(10), date(2024, 1, 5))
            .await
            .unwrap();
        assert!(impact.is_none());
    }

    #[tokio::test]
    async fn test_preview_projects_new_total() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let alerts = AlertService::new(Arc::clone(&fx.store));
        service.create(fx.user, january(&fx)).await.unwrap();
        fx.expense(&fx.groceries, dec!(700), date(2024, 1, 3));

        let near = alerts
            .preview_transaction_impact(fx.user, fx.groceries.id, dec!(150), date(2024, 1, 20))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(near.current_spending, dec!(700));
        assert_eq!(near.new_total, dec!(850));
        assert_eq!(near.remaining, dec!(150));
        assert_eq!(near.percentage_used, dec!(85.00));
        assert!(near.near_limit);
        assert!(!near.exceeded);

        let over = alerts
            .preview_transaction_impact(fx.user, fx.groceries.id, dec!(400), date(2024, 1, 20))
            .await
            .unwrap()
            .unwrap();
        assert!(over.exceeded);
        assert!(!over.near_limit);

        let outside = alerts
            .preview_transaction_impact(fx.user, fx.groceries.id, dec!(400), date(2024, 2, 20))
            .await
            .unwrap();
        assert!(outside.is_none());
    }

    #[tokio::test]
    async fn test_preview_of_huge_amount_saturates() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let alerts = AlertService::new(Arc::clone(&fx.store));
        service.create(fx.user, january(&fx)).await.unwrap();
        fx.expense(&fx.groceries, dec!(700), date(2024, 1, 3));

        let impact = alerts
            .preview_transaction_impact(fx.user, fx.groceries.id, Decimal::MAX, date(2024, 1, 20))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(impact.new_total, Decimal::MAX);
        assert!(impact.exceeded);
        assert!(!impact.near_limit);
    }

    #[tokio::test]
    async fn test_get_alerts() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let alerts = AlertService::new(Arc::clone(&fx.store));
        service.create(fx.user, january(&fx)).await.unwrap();
        let mut transport = input(&fx, dec!(100), (2024, 1, 1), (2024, 1, 31));
        transport.category_id = fx.transport.id;
        service.create(fx.user, transport).await.unwrap();
        let mut salary_budget = input(&fx, dec!(100), (2024, 1, 1), (2024, 1, 31));
        salary_budget.category_id = fx.salary.id;
        service.create(fx.user, salary_budget).await.unwrap();

        fx.expense(&fx.groceries, dec!(850), date(2024, 1, 5));
        fx.expense(&fx.transport, dec!(130), date(2024, 1, 5));

        let mut list = alerts.get_alerts(fx.user).await.unwrap();
        list.sort_by_key(|a| a.category.clone());
        assert_eq!(list.len(), 2);

        assert_eq!(list[0].alert_type, AlertType::BudgetWarning);
        assert_eq!(list[0].severity, NotificationPriority::Medium);
        assert_eq!(list[0].message, "Approaching budget limit for Groceries");
        assert_eq!(list[0].details.remaining, Some(dec!(150)));
        assert_eq!(list[0].details.percentage, Some(dec!(85.00)));

        assert_eq!(list[1].alert_type, AlertType::OverBudget);
        assert_eq!(list[1].severity, NotificationPriority::High);
        assert_eq!(list[1].message, "Budget exceeded for Transport");
        assert_eq!(list[1].details.overage, Some(dec!(30)));
    }

    #[tokio::test]
    async fn test_alert_after_commit_writes_notification() {
        let fx = Fixture::new();
        let service = BudgetService::new(Arc::clone(&fx.store));
        let alerts = AlertService::new(Arc::clone(&fx.store)).with_currency_symbol("KSH");
        service.create(fx.user, january(&fx)).await.unwrap();

        fx.expense(&fx.groceries, dec!(600), date(2024, 1, 3));
        let quiet = fx.expense(&fx.groceries, dec!(100), date(2024, 1, 4));
        assert!(alerts.alert_after_commit(&quiet).await.unwrap().is_none());

        let warn = fx.expense(&fx.groceries, dec!(150), date(2024, 1, 5));
        let note = alerts.alert_after_commit(&warn).await.unwrap().unwrap();
        assert_eq!(note.title, "Budget Warning");
        assert_eq!(note.priority, NotificationPriority::Medium);
        assert_eq!(note.message, "Budget warning! You are approaching your budget limit.");
        assert_eq!(note.related_id, Some(warn.id));
        assert_eq!(note.related_type.as_deref(), Some("transaction"));

        let over = fx.expense(&fx.groceries, dec!(250), date(2024, 1, 6));
        let note = alerts.alert_after_commit(&over).await.unwrap().unwrap();
        assert_eq!(note.title, "Budget Exceeded");
        assert_eq!(note.priority, NotificationPriority::High);
        assert_eq!(
            note.message,
            "Budget exceeded! You have spent KSH 1,100.00 out of KSH 1,000.00"
        );

        assert_eq!(fx.store.notifications(fx.user).len(), 2);
    }

    #[tokio::test]
    async fn test_alert_after_commit_ignores_income() {
        let fx = Fixture::new();
        let alerts = AlertService::new(Arc::clone(&fx.store));
        let tx = fx.income(&fx.transport, dec!(5000), date(2024, 1, 3));
        assert!(alerts.alert_after_commit(&tx).await.unwrap().is_none());
    }
}
