//! Shared types, errors, and configuration for Ledgerwise.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with decimal precision
//! - Typed IDs for type-safe entity references
//! - The `{success, message, data}` response envelope
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AnalyticsConfig, AppConfig, DatabaseConfig};
pub use error::{AppError, AppResult};
