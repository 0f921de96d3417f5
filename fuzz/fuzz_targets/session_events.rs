//! Fuzz target for the chatroom session machine
//!
//! # Strategy
//!
//! - Channel lifecycle in any order: duplicate opens, errors, late frames
//! - Frames: well-formed server messages mixed with arbitrary text
//! - Composer edits and submits at every stage
//! - Teardown at a random point, then keep feeding events
//!
//! # Invariants
//!
//! - The log only grows
//! - Disconnected is terminal
//! - At most one close
//! - Nothing is sent once disconnected or torn down

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use searchbuddy_client::{
    ChannelEvent, Chatroom, Edit, ServerMessage, Session, SessionAction,
    SessionEvent, SessionId,
};

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Opened,
    Closed,
    Error,
    Joined(i32),
    NewUser(i32),
    UserDisconnected(i32),
    NewMessage(String),
    History(Vec<String>),
    RawFrame(String),
    Type(char),
    Backspace,
    Submit,
    Teardown,
}

impl Op {
    fn event(self) -> Option<SessionEvent> {
        let server = |message: ServerMessage| {
            message.encode().ok().map(|text| SessionEvent::from(ChannelEvent::Frame(text)))
        };
        match self {
            Self::Opened => Some(ChannelEvent::Opened.into()),
            Self::Closed => Some(ChannelEvent::Closed.into()),
            Self::Error => Some(ChannelEvent::Error { reason: "fuzz".into() }.into()),
            Self::Joined(chatroom_id) => server(ServerMessage::Joined { chatroom_id }),
            Self::NewUser(user_id) => server(ServerMessage::NewUser { user_id }),
            Self::UserDisconnected(user_id) => server(ServerMessage::UserDisconnected { user_id }),
            Self::NewMessage(content) => server(ServerMessage::NewMessage { content }),
            Self::History(messages) => server(ServerMessage::ChatsFromTodayResponse { messages }),
            Self::RawFrame(text) => Some(ChannelEvent::Frame(text).into()),
            Self::Type(c) => Some(SessionEvent::Edit(Edit::Insert(c))),
            Self::Backspace => Some(SessionEvent::Edit(Edit::Backspace)),
            Self::Submit => Some(SessionEvent::Submit),
            Self::Teardown => None,
        }
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let chatroom = Chatroom {
        chatroom_id: 1,
        num_users: 0,
        online: true,
        term: "fuzz".into(),
        url: "ws://fuzz/chat/1".into(),
    };
    let (mut session, _) = Session::new(SessionId::new(1), chatroom);

    let mut closes = 0;

    for op in ops {
        let before = session.log().to_vec();
        let was_terminal = session.state().is_terminal();
        let was_torn_down = session.is_torn_down();

        let actions = match op.event() {
            Some(event) => session.handle(event),
            None => session.teardown(),
        };

        assert!(session.log().starts_with(&before), "log rewritten");
        assert!(!was_terminal || session.state().is_terminal(), "left Disconnected");

        for action in actions {
            match action {
                SessionAction::Escalate(_) => {},
                SessionAction::Close => closes += 1,
                SessionAction::Send(message) => {
                    assert!(!was_terminal && !was_torn_down, "sent {message:?} after shutdown");
                },
                SessionAction::Open { .. } => panic!("reopened channel"),
            }
        }
    }

    assert!(closes <= 1, "closed {closes} times");
});
