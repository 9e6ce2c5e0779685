use cartographer_api::TransportError;
use std::fmt;
use thiserror::Error;

/// Message the store boundary reports when a point lookup matched nothing.
pub const ERROR_RECORD_NOT_FOUND: &str = "result contains no records";
/// Message the store boundary reports when a point lookup matched several roots.
pub const ERROR_RECORD_MORE_THAN_ONE: &str = "result contains more than one record";

/// The error type for Cartographer lookups.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller's arguments cannot form a query. `key` names the entity.
    #[error("{message}")]
    Validation { key: String, message: String },

    #[error("result contains no records")]
    NotFound,

    #[error("result contains more than one record")]
    Ambiguous,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("hydration error: {0}")]
    Hydration(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::NotFound => ErrorKind::NotFound,
            Error::Ambiguous => ErrorKind::Ambiguous,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Hydration(_) => ErrorKind::Hydration,
        }
    }
}

/// Error kinds, for callers that map outcomes without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Ambiguous,
    Transport,
    Hydration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Ambiguous => "ambiguous",
            ErrorKind::Transport => "transport",
            ErrorKind::Hydration => "hydration",
        }
    }

    /// HTTP status the query gateway answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation | ErrorKind::Ambiguous => 412,
            ErrorKind::Transport | ErrorKind::Hydration => 500,
        }
    }

    /// Expected outcomes of a lookup, as opposed to failures.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Ambiguous
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specialized Result type for Cartographer lookups.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_messages() {
        assert_eq!(Error::NotFound.to_string(), ERROR_RECORD_NOT_FOUND);
        assert_eq!(Error::Ambiguous.to_string(), ERROR_RECORD_MORE_THAN_ONE);
    }

    #[test]
    fn kinds_and_status() {
        let err = Error::validation("city", "need min one argument");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "need min one argument");
        assert_eq!(err.kind().status_code(), 412);

        assert_eq!(Error::NotFound.kind().status_code(), 404);
        assert_eq!(Error::Ambiguous.kind().status_code(), 412);

        let transport: Error = TransportError::Statement("syntax".into()).into();
        assert_eq!(transport.kind(), ErrorKind::Transport);
        assert_eq!(transport.kind().status_code(), 500);
        assert!(!transport.kind().is_recoverable());
        assert!(ErrorKind::NotFound.is_recoverable());
    }

    #[test]
    fn hydration_from_serde() {
        let err: Error = serde_json::from_str::<u8>("\"x\"").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Hydration);
        assert!(err.to_string().starts_with("hydration error:"));
    }
}
