//! Error types for the appraisal engine
//!
//! Only contract violations are errors. A missing rate of return or an
//! undefined benefit/cost ratio is a valid outcome and is reported as `None`.

use thiserror::Error;

/// Errors raised at the boundary of the appraisal engine
#[derive(Debug, Error)]
pub enum AppraisalError {
    /// A cashflow sequence needs at least the period-0 outlay
    #[error("cashflow sequence is empty; period 0 is required")]
    EmptyCashflows,

    #[error("cashflow at period {period} is not a finite number")]
    NonFiniteCashflow { period: usize },

    /// Discounting is undefined for rates at or below -100%
    #[error("discount rate {0} is outside the valid domain (-1, +inf)")]
    InvalidRate(f64),

    #[error("trial count must be between 1 and 1000000, got {0}")]
    InvalidTrialCount(usize),

    #[error("noise standard deviation must be positive and finite, got {0}")]
    InvalidSigma(f64),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppraisalError>;
