//! Error types for hash store and hasher operations.

use thiserror::Error;

/// Errors that can occur while registering, hashing, or looking up values.
#[derive(Debug, Error)]
pub enum HashError {
    /// A code is not usable on the wire.
    #[error("invalid code {code:?} in {store}: {reason}")]
    InvalidCode {
        store: String,
        code: String,
        reason: String,
    },

    /// The value is already registered under a different code.
    #[error("value {value:?} already registered in {store} as {existing:?}")]
    DuplicateValue {
        store: String,
        value: String,
        existing: String,
    },

    /// The code is already bound to a different value.
    #[error("code {code:?} already bound in {store} to {existing:?}")]
    DuplicateCode {
        store: String,
        code: String,
        existing: String,
    },

    /// A store identifier component has no registered code.
    #[error("unregistered store {component}: {value:?}")]
    UnregisteredStore {
        component: &'static str,
        value: String,
    },

    /// A code has no registered value.
    #[error("unknown code {code:?} in {store}")]
    UnknownCode { store: String, code: String },

    /// Radix outside 2..=36.
    #[error("unsupported radix: {0}")]
    InvalidRadix(u32),

    /// A hashed value cannot be decoded.
    #[error("malformed hash {value:?}: {reason}")]
    MalformedHash { value: String, reason: String },

    /// The hash configuration could not be read.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error while loading configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for hash operations.
pub type HashResult<T> = std::result::Result<T, HashError>;
