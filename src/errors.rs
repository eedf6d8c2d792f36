use thiserror::Error;

/// Error type that captures common form-engine failures.
///
/// Validation failures, blocked navigation, blocked appends, and rejected
/// file assignments are outcomes, not errors; this type only covers unknown
/// entity codes and the I/O seams of the surrounding shell.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
