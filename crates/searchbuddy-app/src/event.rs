//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keys, resize, high-level intents).
//! - I/O completions reported by the driver (discovery, channel lifecycle).

use searchbuddy_client::{ChannelEvent, Chatroom, SessionId};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Search submitted.
    Search {
        /// Raw search input.
        terms: String,
    },

    /// Discovery returned a chatroom list.
    DiscoverySucceeded {
        /// Candidate chatrooms, in server order.
        chatrooms: Vec<Chatroom>,
    },

    /// Discovery failed.
    DiscoveryFailed {
        /// Diagnostic, logged only.
        reason: String,
    },

    /// Room chosen from the list.
    SelectRoom {
        /// The chosen room.
        chatroom: Chatroom,
    },

    /// Message composed and submitted in one step.
    MessageComposed {
        /// Message text.
        content: String,
    },

    /// Leave the current room.
    LeaveRoom,

    /// Channel lifecycle event for a session.
    Channel {
        /// Session the channel was opened for.
        session: SessionId,
        /// The lifecycle event.
        event: ChannelEvent,
    },

    /// Unrecoverable error.
    Error {
        /// Message shown to the user.
        message: String,
    },
}
