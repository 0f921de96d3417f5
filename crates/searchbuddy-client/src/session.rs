//! Chatroom session state machine.
//!
//! A [`Session`] covers one chatroom connection from channel-open to close.
//! Chat-log bookkeeping lives in the pure [`transition`] function; the
//! session wrapper adds the handshake, composer and teardown rules around it.

use std::fmt;

use searchbuddy_proto::{Chatroom, ClientMessage, ServerMessage};

use crate::{ChannelEvent, Composer, SessionAction, SessionError, SessionEvent};

/// Identifies one session instance.
///
/// Allocated monotonically by the owner; channel events tagged with an id
/// other than the current session's are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a chatroom session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Channel requested, no server message yet.
    #[default]
    Connecting,
    /// At least one server message received.
    Active {
        /// Chat log, append-only.
        log: Vec<String>,
    },
    /// Channel closed. Terminal.
    Disconnected {
        /// Chat log at the time of closing.
        log: Vec<String>,
    },
}

impl SessionState {
    /// Chat log. Empty while connecting.
    pub fn log(&self) -> &[String] {
        match self {
            Self::Connecting => &[],
            Self::Active { log } | Self::Disconnected { log } => log,
        }
    }

    /// True once the channel has closed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Disconnected { .. })
    }
}

/// Input to the pure session reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A decoded server message.
    Message(ServerMessage),
    /// The channel closed.
    Closed,
}

/// Pure session transition.
///
/// Returns the next state; `state` itself is never modified.
pub fn transition(state: &SessionState, inbound: Inbound) -> SessionState {
    match (state, inbound) {
        (SessionState::Disconnected { .. }, _) => state.clone(),
        (_, Inbound::Closed) => SessionState::Disconnected { log: state.log().to_vec() },
        (_, Inbound::Message(message)) => {
            let mut log = state.log().to_vec();
            append_lines(&mut log, message);
            SessionState::Active { log }
        },
    }
}

fn append_lines(log: &mut Vec<String>, message: ServerMessage) {
    match message {
        ServerMessage::Joined { .. } => log.push("Joined chatroom!".to_owned()),
        ServerMessage::NewUser { user_id } => log.push(format!("User {user_id} joined chatroom!")),
        ServerMessage::UserDisconnected { user_id } => {
            log.push(format!("User {user_id} left chatroom!"));
        },
        ServerMessage::NewMessage { content } => log.push(content),
        ServerMessage::ChatsFromTodayResponse { messages } => log.extend(messages),
    }
}

/// One chatroom connection.
///
/// The caller is responsible for:
/// - Executing the returned [`SessionAction`]s
/// - Delivering channel events for this session's channel only
/// - Calling [`Session::teardown`] when the session is abandoned
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    chatroom: Chatroom,
    state: SessionState,
    /// Channel opened and not yet closed.
    channel_live: bool,
    /// Join handshake already sent.
    join_sent: bool,
    /// Channel error already escalated.
    channel_failed: bool,
    torn_down: bool,
    composer: Composer,
}

impl Session {
    /// Start a session for `chatroom`.
    ///
    /// Returns the session in `Connecting` and the action opening its
    /// channel.
    pub fn new(id: SessionId, chatroom: Chatroom) -> (Self, Vec<SessionAction>) {
        let actions = vec![SessionAction::Open { url: chatroom.url.clone() }];
        let session = Self {
            id,
            chatroom,
            state: SessionState::Connecting,
            channel_live: false,
            join_sent: false,
            channel_failed: false,
            torn_down: false,
            composer: Composer::new(),
        };
        (session, actions)
    }

    /// Session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Chatroom this session serves.
    pub fn chatroom(&self) -> &Chatroom {
        &self.chatroom
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Chat log.
    pub fn log(&self) -> &[String] {
        self.state.log()
    }

    /// Message composer.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// True while the channel is open.
    pub fn is_live(&self) -> bool {
        self.channel_live
    }

    /// True after [`Session::teardown`].
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        if self.torn_down {
            tracing::debug!(session = %self.id, "event after teardown ignored");
            return Vec::new();
        }

        match event {
            SessionEvent::Channel(event) => self.handle_channel(event),
            SessionEvent::Edit(edit) => {
                if !self.state.is_terminal() {
                    self.composer.apply(edit);
                }
                Vec::new()
            },
            SessionEvent::Submit => self.handle_submit(),
        }
    }

    /// Abandon the session.
    ///
    /// Closes the channel the first time it is called; later calls return
    /// nothing. No event is accepted afterward.
    pub fn teardown(&mut self) -> Vec<SessionAction> {
        if self.torn_down {
            return Vec::new();
        }
        self.torn_down = true;
        self.channel_live = false;
        vec![SessionAction::Close]
    }

    fn handle_channel(&mut self, event: ChannelEvent) -> Vec<SessionAction> {
        if self.state.is_terminal() {
            tracing::debug!(session = %self.id, ?event, "event after disconnect ignored");
            return Vec::new();
        }

        match event {
            ChannelEvent::Opened => self.handle_opened(),
            ChannelEvent::Frame(text) => match ServerMessage::decode(&text) {
                Ok(message) => {
                    self.state = transition(&self.state, Inbound::Message(message));
                    Vec::new()
                },
                Err(error) => vec![SessionAction::Escalate(SessionError::Protocol(error))],
            },
            ChannelEvent::Error { reason } => {
                if self.channel_failed {
                    return Vec::new();
                }
                self.channel_failed = true;
                vec![SessionAction::Escalate(SessionError::Channel { reason })]
            },
            ChannelEvent::Closed => {
                self.channel_live = false;
                self.state = transition(&self.state, Inbound::Closed);
                Vec::new()
            },
        }
    }

    fn handle_opened(&mut self) -> Vec<SessionAction> {
        if self.join_sent || !matches!(self.state, SessionState::Connecting) {
            return Vec::new();
        }
        self.channel_live = true;
        self.join_sent = true;
        vec![
            SessionAction::Send(ClientMessage::Join { chatroom_id: self.chatroom.chatroom_id }),
            SessionAction::Send(ClientMessage::ChatsFromTodayRequest),
        ]
    }

    fn handle_submit(&mut self) -> Vec<SessionAction> {
        let active = matches!(self.state, SessionState::Active { .. });
        if !active || !self.channel_live || self.composer.is_blank() {
            return Vec::new();
        }
        let content = self.composer.take();
        vec![SessionAction::Send(ClientMessage::NewMessage { content })]
    }
}
