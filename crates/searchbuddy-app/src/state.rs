//! Navigation states.

use searchbuddy_client::{Chatroom, Session};

/// Top-level screen the application is on.
#[derive(Debug, Clone, Default)]
pub enum AppState {
    /// Editing the search box, possibly awaiting discovery.
    #[default]
    Searching,
    /// Choosing from a discovered chatroom list.
    ChoosingRoom {
        /// Discovered chatrooms, in server order.
        chatrooms: Vec<Chatroom>,
        /// Cursor index into `chatrooms`.
        selected: usize,
    },
    /// Inside a chatroom.
    InRoom {
        /// The joined room.
        chatroom: Chatroom,
        /// The room's session. Owned exclusively.
        session: Session,
    },
    /// Unrecoverable failure. Absorbing.
    Failed {
        /// Message shown to the user.
        message: String,
    },
}

impl AppState {
    /// Short state name for logs and snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Searching => "Searching",
            Self::ChoosingRoom { .. } => "ChoosingRoom",
            Self::InRoom { .. } => "InRoom",
            Self::Failed { .. } => "Failed",
        }
    }

    /// True in the absorbing `Failed` state.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Session owned by this state, if in a room.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::InRoom { session, .. } => Some(session),
            _ => None,
        }
    }
}
