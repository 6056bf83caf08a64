//! Core business logic for Ledgerwise.
//!
//! This crate contains the budget and analytics engine with ZERO database
//! dependencies. Persistence is reached through the [`store::LedgerStore`]
//! trait, implemented by the db crate.
//!
//! # Modules
//!
//! - `store` - Query interface over the ledger, plus an in-memory implementation
//! - `ledger` - Categories, transactions, notifications and the write path
//! - `budget` - Budget lifecycle, usage evaluation and alerts
//! - `inference` - Automatic budgets from historical spending
//! - `reports` - Report generation and export

pub mod budget;
pub mod inference;
pub mod ledger;
pub mod reports;
pub mod store;

#[cfg(test)]
mod testing;
