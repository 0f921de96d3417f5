//! Session error types.

use searchbuddy_proto::ProtocolError;
use thiserror::Error;

/// Unrecoverable session conditions, escalated to the caller.
///
/// Neither kind is retried. A malformed message means the channel can no
/// longer be trusted; a transport failure means it can no longer be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Inbound message outside the server vocabulary.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Transport-level failure reported by the channel.
    #[error("channel error: {reason}")]
    Channel {
        /// Transport diagnostic.
        reason: String,
    },
}
