//! Ledger records (categories, transactions, notifications) and the
//! transaction write path.

pub mod error;
pub mod recorder;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::RecordError;
pub use recorder::{RecordedTransaction, TRANSACTION_RECORDED, TransactionRecorder};
pub use types::{
    Category, CategoryType, NewNotification, NewTransaction, Notification, NotificationKind,
    NotificationPriority, Transaction, TransactionStatus, TransactionType,
};
