use thiserror::Error;

/// Failure reported by the store-access boundary.
///
/// The payload is the driver's own message; nothing above the boundary
/// inspects it beyond logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("statement error: {0}")]
    Statement(String),
}
