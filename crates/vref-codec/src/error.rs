use thiserror::Error;
use vref_hash::HashError;
use vref_types::TypeError;

/// A token stream that does not match the grammar.
///
/// Positions are token indices, counted from zero at the protocol code of
/// the outermost reference.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input at token {position}: expected {expected}")]
    UnexpectedEnd {
        position: usize,
        expected: &'static str,
    },

    #[error("unknown {expected} code {token:?} at token {position}")]
    UnknownCode {
        position: usize,
        token: String,
        expected: &'static str,
    },

    #[error("invalid literal {token:?} at token {position}: {reason}")]
    InvalidLiteral {
        position: usize,
        token: String,
        reason: String,
    },

    #[error("cannot resolve {token:?} at token {position}: {reason}")]
    UnresolvedCode {
        position: usize,
        token: String,
        reason: String,
    },

    #[error("malformed reference at token {position} ({token:?}): {reason}")]
    InvalidShape {
        position: usize,
        token: String,
        reason: String,
    },

    #[error("unexpected trailing token {token:?} at token {position}")]
    TrailingTokens { position: usize, token: String },

    #[error("references nested deeper than {max} levels at token {position}")]
    TooDeep {
        position: usize,
        token: String,
        max: usize,
    },
}

impl ParseError {
    /// Token index where parsing failed.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEnd { position, .. }
            | ParseError::UnknownCode { position, .. }
            | ParseError::InvalidLiteral { position, .. }
            | ParseError::UnresolvedCode { position, .. }
            | ParseError::InvalidShape { position, .. }
            | ParseError::TrailingTokens { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }

    /// The offending token, if input had not already run out.
    pub fn token(&self) -> Option<&str> {
        match self {
            ParseError::UnexpectedEnd { .. } => None,
            ParseError::UnknownCode { token, .. }
            | ParseError::InvalidLiteral { token, .. }
            | ParseError::UnresolvedCode { token, .. }
            | ParseError::InvalidShape { token, .. }
            | ParseError::TrailingTokens { token, .. }
            | ParseError::TooDeep { token, .. } => Some(token),
        }
    }
}

/// Errors from stringifying or parsing references.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A value could not be hashed; fatal for the whole stringify call.
    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    #[error("invalid reference: {0}")]
    Type(#[from] TypeError),

    /// The reference nests deeper than the parser would follow back.
    #[error("reference nested deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("unknown encoding token: {0:?}")]
    UnknownEncoding(Option<char>),

    #[error("not a reference locator: {0}")]
    NotReference(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
