//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while encoding or decoding wire messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Inbound text did not match the expected vocabulary.
    #[error("failed to decode {expected}: {reason}")]
    Decode {
        /// Name of the type that was expected.
        expected: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },

    /// Outbound value could not be serialized.
    #[error("failed to encode {kind}: {reason}")]
    Encode {
        /// Name of the type being encoded.
        kind: &'static str,
        /// Encoder diagnostic.
        reason: String,
    },
}

impl ProtocolError {
    pub(crate) fn decode(expected: &'static str, err: &serde_json::Error) -> Self {
        Self::Decode { expected, reason: err.to_string() }
    }

    pub(crate) fn encode(kind: &'static str, err: &serde_json::Error) -> Self {
        Self::Encode { kind, reason: err.to_string() }
    }
}
