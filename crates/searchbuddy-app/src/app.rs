//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages navigation
//! between searching, choosing a room, chatting and failure, completely
//! decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the search box and the search-status tracker.
//! - Owns at most one chatroom [`Session`] and routes channel events to it.
//! - Escalates session and discovery failures into the absorbing `Failed`
//!   state, closing any open channel on the way.

use searchbuddy_client::{
    ChannelEvent, Chatroom, Composer, Edit, Session, SessionAction, SessionEvent, SessionId,
};

use crate::{AppAction, AppError, AppEvent, AppState, KeyInput, SearchStatus, status::ContextId};

/// Search-status context of the search box.
const SEARCH_CONTEXT: ContextId = 0;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Current screen.
    state: AppState,
    /// Search box.
    search: Composer,
    /// Search-status tracker; the search box is its only context.
    status: SearchStatus,
    /// Terms of the discovery in flight. `None` if idle.
    pending_search: Option<String>,
    /// Id for the next session.
    next_session: SessionId,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an App on the search screen.
    pub fn new() -> Self {
        let mut status = SearchStatus::new();
        status.open(SEARCH_CONTEXT);
        status.activate(SEARCH_CONTEXT);

        Self {
            state: AppState::Searching,
            search: Composer::new(),
            status,
            pending_search: None,
            next_session: SessionId::new(1),
            terminal_size: (80, 24),
        }
    }

    /// Initial actions: first render, then the initial search if any.
    pub fn start(&mut self, initial_terms: Option<String>) -> Vec<AppAction> {
        match initial_terms {
            Some(terms) => self.handle(AppEvent::Search { terms }),
            None => vec![AppAction::Render],
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        let mut actions = match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                Vec::new()
            },
            AppEvent::Search { terms } => {
                if matches!(self.state, AppState::Searching) {
                    self.edit_search(Edit::Replace(terms));
                }
                self.submit_search()
            },
            AppEvent::DiscoverySucceeded { chatrooms } => self.discovery_succeeded(chatrooms),
            AppEvent::DiscoveryFailed { reason } => self.discovery_failed(reason),
            AppEvent::SelectRoom { chatroom } => {
                if matches!(self.state, AppState::ChoosingRoom { .. }) {
                    self.enter_room(chatroom)
                } else {
                    Vec::new()
                }
            },
            AppEvent::MessageComposed { content } => {
                let mut actions = self.session_event(SessionEvent::Edit(Edit::Replace(content)));
                actions.extend(self.session_event(SessionEvent::Submit));
                actions
            },
            AppEvent::LeaveRoom => self.leave_room(),
            AppEvent::Channel { session, event } => self.channel_event(session, event),
            AppEvent::Error { message } => self.fail(AppError::Fatal { message }),
        };
        actions.push(AppAction::Render);
        actions
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match &mut self.state {
            AppState::Searching => match key {
                KeyInput::Enter => self.submit_search(),
                KeyInput::Esc => vec![AppAction::Quit],
                _ => {
                    if let Some(edit) = key.edit() {
                        self.edit_search(edit);
                    }
                    Vec::new()
                },
            },
            AppState::ChoosingRoom { chatrooms, selected } => match key {
                KeyInput::Up if !chatrooms.is_empty() => {
                    *selected = selected.checked_sub(1).unwrap_or(chatrooms.len() - 1);
                    Vec::new()
                },
                KeyInput::Down if !chatrooms.is_empty() => {
                    *selected = (*selected + 1) % chatrooms.len();
                    Vec::new()
                },
                KeyInput::Enter => match chatrooms.get(*selected).cloned() {
                    Some(chatroom) => self.enter_room(chatroom),
                    None => Vec::new(),
                },
                KeyInput::Esc => {
                    self.state = AppState::Searching;
                    self.edit_search(Edit::Clear);
                    Vec::new()
                },
                _ => Vec::new(),
            },
            AppState::InRoom { .. } => match key {
                KeyInput::Enter => self.session_event(SessionEvent::Submit),
                KeyInput::Esc => self.leave_room(),
                _ => match key.edit() {
                    Some(edit) => self.session_event(SessionEvent::Edit(edit)),
                    None => Vec::new(),
                },
            },
            AppState::Failed { .. } => match key {
                KeyInput::Esc => vec![AppAction::Quit],
                _ => Vec::new(),
            },
        }
    }

    fn edit_search(&mut self, edit: Edit) {
        self.search.apply(edit);
        self.status.record(SEARCH_CONTEXT, self.search.text());
    }

    fn submit_search(&mut self) -> Vec<AppAction> {
        if !matches!(self.state, AppState::Searching) || self.search.is_blank() {
            return Vec::new();
        }
        if let Some(pending) = &self.pending_search {
            tracing::debug!(%pending, "discovery already in flight");
            return Vec::new();
        }
        let terms = self.search.text().trim().to_owned();
        tracing::debug!(%terms, "discovery requested");
        self.pending_search = Some(terms.clone());
        vec![AppAction::Discover { terms }]
    }

    fn discovery_succeeded(&mut self, chatrooms: Vec<Chatroom>) -> Vec<AppAction> {
        if !self.awaiting_discovery() {
            tracing::warn!(state = self.state.name(), "stale discovery result ignored");
            return Vec::new();
        }
        self.pending_search = None;
        self.state = AppState::ChoosingRoom { chatrooms, selected: 0 };
        Vec::new()
    }

    fn discovery_failed(&mut self, reason: String) -> Vec<AppAction> {
        if !self.awaiting_discovery() {
            tracing::warn!(state = self.state.name(), %reason, "stale discovery failure ignored");
            return Vec::new();
        }
        self.pending_search = None;
        self.fail(AppError::Discovery { reason })
    }

    /// A discovery result is only accepted for the one lookup in flight.
    fn awaiting_discovery(&self) -> bool {
        matches!(self.state, AppState::Searching) && self.pending_search.is_some()
    }

    fn enter_room(&mut self, chatroom: Chatroom) -> Vec<AppAction> {
        let id = self.next_session;
        self.next_session = id.next();
        tracing::debug!(session = %id, chatroom_id = chatroom.chatroom_id, "entering room");

        let (session, actions) = Session::new(id, chatroom.clone());
        self.state = AppState::InRoom { chatroom, session };
        self.session_actions(id, actions)
    }

    fn leave_room(&mut self) -> Vec<AppAction> {
        let AppState::InRoom { session, .. } = &mut self.state else {
            return Vec::new();
        };
        let id = session.id();
        let actions = session.teardown();

        self.state = AppState::Searching;
        self.edit_search(Edit::Clear);
        self.session_actions(id, actions)
    }

    fn channel_event(&mut self, id: SessionId, event: ChannelEvent) -> Vec<AppAction> {
        if self.session().map(Session::id) == Some(id) {
            self.session_event(SessionEvent::Channel(event))
        } else {
            tracing::warn!(session = %id, ?event, "event for inactive session dropped");
            Vec::new()
        }
    }

    /// Forward an event to the current session, if any.
    fn session_event(&mut self, event: SessionEvent) -> Vec<AppAction> {
        let AppState::InRoom { session, .. } = &mut self.state else {
            return Vec::new();
        };
        let id = session.id();
        let actions = session.handle(event);
        self.session_actions(id, actions)
    }

    /// Translate session actions, escalating into `Failed`.
    fn session_actions(&mut self, id: SessionId, actions: Vec<SessionAction>) -> Vec<AppAction> {
        let mut out = Vec::with_capacity(actions.len());
        let mut escalation = None;

        for action in actions {
            match action {
                SessionAction::Open { url } => out.push(AppAction::OpenChannel { session: id, url }),
                SessionAction::Send(message) => out.push(AppAction::Send { session: id, message }),
                SessionAction::Close => out.push(AppAction::CloseChannel { session: id }),
                SessionAction::Escalate(error) => {
                    escalation.get_or_insert(error);
                },
            }
        }

        if let Some(error) = escalation {
            out.extend(self.fail(error.into()));
        }
        out
    }

    /// Enter `Failed`, tearing down any session. No-op once failed.
    fn fail(&mut self, error: AppError) -> Vec<AppAction> {
        if self.state.is_failed() {
            return Vec::new();
        }
        tracing::warn!(error = %error, detail = error.detail(), "application failed");

        let mut actions = Vec::new();
        if let AppState::InRoom { session, .. } = &mut self.state {
            let id = session.id();
            if !session.teardown().is_empty() {
                actions.push(AppAction::CloseChannel { session: id });
            }
        }
        self.state = AppState::Failed { message: error.to_string() };
        actions
    }

    /// Current screen.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Search box.
    pub fn search(&self) -> &Composer {
        &self.search
    }

    /// Search-status tracker.
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Terms of the discovery in flight. `None` if idle.
    pub fn pending_search(&self) -> Option<&str> {
        self.pending_search.as_deref()
    }

    /// Current session, if in a room.
    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}
