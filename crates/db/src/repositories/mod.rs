//! Repository implementations for data access.
//!
//! Repositories hide the `SeaORM` implementation details from the engine,
//! which only sees the [`LedgerStore`](ledgerwise_core::store::LedgerStore) trait.

pub mod ledger;
mod mapping;

pub use ledger::SeaLedgerStore;
