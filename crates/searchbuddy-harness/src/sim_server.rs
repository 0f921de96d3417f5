//! In-memory chat server for simulation.
//!
//! `SimServer` implements the server side of the chatroom protocol with no
//! I/O: callers feed it decoded client messages per connection and get back
//! the server messages each connection should receive. Rooms keep their
//! message history for `ChatsFromTodayRequest`.

use std::collections::{BTreeMap, HashMap};

use searchbuddy_client::SessionId;
use searchbuddy_proto::{ClientMessage, ServerMessage};

/// One delivery: the connection and the message it receives.
pub type Delivery = (SessionId, ServerMessage);

#[derive(Debug, Default)]
struct Room {
    history: Vec<String>,
    members: Vec<SessionId>,
}

/// In-memory chat server.
#[derive(Debug, Default)]
pub struct SimServer {
    rooms: BTreeMap<i32, Room>,
    /// Room and user id of each joined connection.
    joined: HashMap<SessionId, (i32, i32)>,
    next_user_id: i32,
}

impl SimServer {
    /// Create a server with no rooms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a room's history.
    #[must_use]
    pub fn with_history(mut self, chatroom_id: i32, messages: &[&str]) -> Self {
        let room = self.rooms.entry(chatroom_id).or_default();
        room.history.extend(messages.iter().map(|m| (*m).to_owned()));
        self
    }

    /// History of a room, oldest first.
    pub fn history(&self, chatroom_id: i32) -> &[String] {
        self.rooms.get(&chatroom_id).map_or(&[], |room| room.history.as_slice())
    }

    /// Connections currently joined to a room.
    pub fn members(&self, chatroom_id: i32) -> &[SessionId] {
        self.rooms.get(&chatroom_id).map_or(&[], |room| room.members.as_slice())
    }

    /// Handle one message from `from`.
    pub fn handle(&mut self, from: SessionId, message: ClientMessage) -> Vec<Delivery> {
        match message {
            ClientMessage::Join { chatroom_id } => self.join(from, chatroom_id),
            ClientMessage::ChatsFromTodayRequest => {
                let messages = self
                    .joined
                    .get(&from)
                    .map(|(room, _)| self.history(*room).to_vec())
                    .unwrap_or_default();
                vec![(from, ServerMessage::ChatsFromTodayResponse { messages })]
            },
            ClientMessage::NewMessage { content } => {
                let Some((chatroom_id, _)) = self.joined.get(&from).copied() else {
                    tracing::debug!(session = %from, "message before join dropped");
                    return Vec::new();
                };
                let room = self.rooms.entry(chatroom_id).or_default();
                room.history.push(content.clone());
                room.members
                    .iter()
                    .map(|member| (*member, ServerMessage::NewMessage { content: content.clone() }))
                    .collect()
            },
        }
    }

    /// Drop a connection, telling the rest of its room.
    pub fn disconnect(&mut self, session: SessionId) -> Vec<Delivery> {
        let Some((chatroom_id, user_id)) = self.joined.remove(&session) else {
            return Vec::new();
        };
        let room = self.rooms.entry(chatroom_id).or_default();
        room.members.retain(|member| *member != session);
        room.members
            .iter()
            .map(|member| (*member, ServerMessage::UserDisconnected { user_id }))
            .collect()
    }

    fn join(&mut self, from: SessionId, chatroom_id: i32) -> Vec<Delivery> {
        if self.joined.contains_key(&from) {
            return Vec::new();
        }
        self.next_user_id += 1;
        let user_id = self.next_user_id;
        self.joined.insert(from, (chatroom_id, user_id));

        let room = self.rooms.entry(chatroom_id).or_default();
        let mut deliveries: Vec<Delivery> = room
            .members
            .iter()
            .map(|member| (*member, ServerMessage::NewUser { user_id }))
            .collect();
        room.members.push(from);
        deliveries.push((from, ServerMessage::Joined { chatroom_id }));
        deliveries
    }
}
