//! Error types for GUID and policy handle handling

use thiserror::Error;

/// Errors raised while constructing, decoding or comparing identifiers
#[derive(Debug, Error)]
pub enum MiscError {
    /// Binary input had the wrong number of bytes
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// Textual input is not a well-formed GUID
    #[error("invalid GUID format: {0}")]
    InvalidFormat(String),

    /// Comparison against a value that is not a GUID
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// Buffer underflow - not enough data to decode a value
    #[error("buffer underflow: needed {needed} bytes, have {have}")]
    BufferUnderflow { needed: usize, have: usize },

    /// The external configuration service could not supply a context
    #[error("loadparm context unavailable: {0}")]
    ContextUnavailable(String),

    /// An error annotated with the configuration context it occurred under
    #[error("{source} (context: {context})")]
    WithContext {
        context: String,
        #[source]
        source: Box<MiscError>,
    },
}

impl MiscError {
    /// Returns the underlying error, looking through any context annotations.
    pub fn root(&self) -> &MiscError {
        match self {
            MiscError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for identifier operations
pub type Result<T> = std::result::Result<T, MiscError>;
