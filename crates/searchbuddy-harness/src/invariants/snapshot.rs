//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the App at a point in time.
//! Invariants compare consecutive snapshots rather than live state to ensure
//! consistent, atomic checks.

use searchbuddy_app::{App, AppState};
use searchbuddy_client::SessionId;

/// Snapshot of the App's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Navigation state name.
    pub state: &'static str,
    /// Message shown in `Failed`. `None` in any other state.
    pub failed_message: Option<String>,
    /// Room-list cursor and length. `None` unless choosing a room.
    pub selection: Option<(usize, usize)>,
    /// Current session. `None` unless in a room.
    pub session: Option<SessionSnapshot>,
}

/// Snapshot of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Session id.
    pub id: SessionId,
    /// Chat log.
    pub log: Vec<String>,
    /// Channel has closed.
    pub disconnected: bool,
}

impl AppSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        let state = app.state();
        let failed_message = match state {
            AppState::Failed { message } => Some(message.clone()),
            _ => None,
        };
        let selection = match state {
            AppState::ChoosingRoom { chatrooms, selected } => Some((*selected, chatrooms.len())),
            _ => None,
        };
        let session = app.session().map(|s| SessionSnapshot {
            id: s.id(),
            log: s.log().to_vec(),
            disconnected: s.state().is_terminal(),
        });

        Self { state: state.name(), failed_message, selection, session }
    }
}
