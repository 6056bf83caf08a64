//! Automatic budget inference from historical spending.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::InferenceError;
pub use service::{BudgetInference, INFERENCE_BUFFER, MAX_LOOKBACK_MONTHS, MIN_LOOKBACK_MONTHS};
pub use types::{InferenceOutcome, InferenceSkip, SpendingPattern};
