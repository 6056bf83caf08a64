//! Financial report generation.
//!
//! This module turns store aggregates into the fixed report shapes:
//! - Income Statement
//! - Expense Breakdown
//! - Budget Analysis
//! - Monthly Summary
//! - Trend Analysis
//!
//! Reports are computed fresh on every request and can be exported to CSV or JSON.

pub mod builder;
pub mod error;
pub mod export;
pub mod service;
pub mod types;
pub mod window;


pub use error::ReportError;
pub use export::{ExportFormat, ExportedFile, ReportExporter};
pub use service::ReportService;
pub use types::*;
pub use window::{DateRange, RelativeWindow, today};
