//! Session events and actions.

use searchbuddy_proto::ClientMessage;

use crate::{Edit, SessionError};

/// Channel lifecycle notifications.
///
/// The transport delivers exactly these four, in arrival order, for the
/// channel it was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Channel is open and writable.
    Opened,
    /// A text frame arrived.
    Frame(String),
    /// The transport reported a failure.
    Error {
        /// Transport diagnostic.
        reason: String,
    },
    /// The channel closed.
    Closed,
}

/// Events the caller feeds into a [`crate::Session`].
///
/// The caller is responsible for:
/// - Delivering channel lifecycle events for this session only
/// - Forwarding composer edits and submit requests from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Channel lifecycle event.
    Channel(ChannelEvent),
    /// Edit the message composer.
    Edit(Edit),
    /// Send the composed message.
    Submit,
}

impl From<ChannelEvent> for SessionEvent {
    fn from(event: ChannelEvent) -> Self {
        Self::Channel(event)
    }
}

/// Actions the session produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Open the channel to this endpoint.
    Open {
        /// Channel endpoint URL.
        url: String,
    },
    /// Write this message to the channel.
    Send(ClientMessage),
    /// Close the channel. Produced at most once per session.
    Close,
    /// Unrecoverable condition for the owner to handle.
    Escalate(SessionError),
}
