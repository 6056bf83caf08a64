//! Budget lifecycle, usage evaluation and alerting.

pub mod alert;
pub mod error;
pub mod interval;
pub mod service;
pub mod types;
pub mod usage;

#[cfg(test)]
mod tests;

pub use alert::{AlertError, AlertService, AlertType, BudgetAlert, BudgetImpact};
pub use error::BudgetError;
pub use interval::BudgetInterval;
pub use service::{
    BUDGET_CREATED, BUDGET_DELETED, BUDGET_UPDATED, BudgetService, DEFAULT_ALERT_THRESHOLD,
};
pub use types::{
    Budget, BudgetPatch, BudgetPeriod, BudgetWithUsage, CategoryUsage, CreateBudgetInput,
    NewBudget, UsageStatistics,
};
pub use usage::{BudgetStatus, BudgetUsage};
