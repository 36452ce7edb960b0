use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid content locator: {0}")]
    InvalidLocator(String),

    #[error("invalid {protocol} reference: {reason}")]
    InvalidShape {
        protocol: &'static str,
        reason: String,
    },
}
