//! Errors that end the application in [`crate::AppState::Failed`].

use searchbuddy_client::SessionError;
use thiserror::Error;

/// Unrecoverable application errors.
///
/// `Display` is the static message shown to the user. Details are carried
/// for logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Discovery request failed.
    #[error("Couldn't communicate with the searchbuddy server.")]
    Discovery {
        /// Diagnostic.
        reason: String,
    },

    /// Server sent a message outside the protocol.
    #[error("An invalid message was received from server.")]
    Protocol {
        /// Diagnostic.
        reason: String,
    },

    /// Chatroom channel failed.
    #[error("An error occurred while communicating with chatroom.")]
    Channel {
        /// Diagnostic.
        reason: String,
    },

    /// Any other unrecoverable error.
    #[error("{message}")]
    Fatal {
        /// Message shown to the user.
        message: String,
    },
}

impl AppError {
    /// Diagnostic detail for logs.
    pub fn detail(&self) -> &str {
        match self {
            Self::Discovery { reason } | Self::Protocol { reason } | Self::Channel { reason } => {
                reason
            },
            Self::Fatal { message } => message,
        }
    }
}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Protocol(e) => Self::Protocol { reason: e.to_string() },
            SessionError::Channel { reason } => Self::Channel { reason },
        }
    }
}
