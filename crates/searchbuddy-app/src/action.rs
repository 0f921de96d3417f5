//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use searchbuddy_client::{ClientMessage, SessionId};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Look up chatrooms for the given search input.
    Discover {
        /// Raw search input, without the default term.
        terms: String,
    },

    /// Open the channel for a session.
    OpenChannel {
        /// Session the channel belongs to.
        session: SessionId,
        /// Channel endpoint URL.
        url: String,
    },

    /// Write a message to a session's channel.
    Send {
        /// Session the channel belongs to.
        session: SessionId,
        /// Message to encode and send.
        message: ClientMessage,
    },

    /// Close a session's channel.
    CloseChannel {
        /// Session the channel belongs to.
        session: SessionId,
    },
}
