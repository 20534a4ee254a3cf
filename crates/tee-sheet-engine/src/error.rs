//! Error types for tee-sheet-engine operations.

use thiserror::Error;

use crate::validation::ValidationIssue;

#[derive(Error, Debug)]
pub enum TeeSheetError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A data-entry problem upstream. Never silently corrected.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Several entities match a date and no rule picks a single winner.
    #[error("Ambiguous resolution: {0}")]
    ResolutionAmbiguity(String),

    #[error("Invalid configuration: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, TeeSheetError>;
