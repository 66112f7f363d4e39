//! Error types for the Diet Assistant shared library

use thiserror::Error;

/// Errors raised when parsing enumerated labels from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown gender: {0} (expected male or female)")]
    UnknownGender(String),

    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(String),

    #[error("Unknown advisor kind: {0} (expected nutritionist or trainer)")]
    UnknownAdvisorKind(String),
}
