//! Shared fixtures for unit tests.

use std::sync::Arc;

use chrono::NaiveDate;
use ledgerwise_shared::types::UserId;
use rust_decimal::Decimal;

use crate::ledger::{Category, CategoryType, Transaction, TransactionType};
use crate::store::MemoryLedgerStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A user with one expense, one income and one mixed category.
pub struct Fixture {
    pub store: Arc<MemoryLedgerStore>,
    pub user: UserId,
    pub groceries: Category,
    pub transport: Category,
    pub salary: Category,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(MemoryLedgerStore::new());
        let user = UserId::new();
        let groceries = store.add_category(user, "Groceries", CategoryType::Expense);
        let transport = store.add_category(user, "Transport", CategoryType::Both);
        let salary = store.add_category(user, "Salary", CategoryType::Income);
        Self {
            store,
            user,
            groceries,
            transport,
            salary,
        }
    }

    pub fn expense(&self, category: &Category, amount: Decimal, on: NaiveDate) -> Transaction {
        self.store
            .add_transaction(self.user, category.id, TransactionType::Expense, amount, on)
    }

    pub fn income(&self, category: &Category, amount: Decimal, on: NaiveDate) -> Transaction {
        self.store
            .add_transaction(self.user, category.id, TransactionType::Income, amount, on)
    }
}
