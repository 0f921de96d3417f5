//! Chat channel messages.
//!
//! Both vocabularies are internally tagged on `"type"`, so
//! `ClientMessage::Join { chatroom_id: 7 }` travels as
//! `{"type":"Join","chatroom_id":7}`.
//!
//! # Invariants
//!
//! Consumers match exhaustively on these enums. Adding a variant is a compile
//! error at every consumption site until it is handled.

use serde::{Deserialize, Serialize};

use crate::errors::{ProtocolError, Result};

/// Message sent from client to chat server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Join the chatroom served over this channel.
    Join {
        /// Room to join.
        chatroom_id: i32,
    },
    /// Post a chat line to the room.
    NewMessage {
        /// Line content, sent verbatim.
        content: String,
    },
    /// Ask for every line posted to the room today.
    ChatsFromTodayRequest,
}

/// Message sent from chat server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Join acknowledged.
    Joined {
        /// Room that was joined.
        chatroom_id: i32,
    },
    /// Another user entered the room.
    NewUser {
        /// Server-assigned id of the user.
        user_id: i32,
    },
    /// A user left the room.
    UserDisconnected {
        /// Server-assigned id of the user.
        user_id: i32,
    },
    /// A chat line was posted.
    NewMessage {
        /// Line content.
        content: String,
    },
    /// Reply to [`ClientMessage::ChatsFromTodayRequest`].
    ChatsFromTodayResponse {
        /// Lines in the order they were posted.
        messages: Vec<String>,
    },
}

impl ClientMessage {
    /// Serialize to JSON text.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProtocolError::encode("ClientMessage", &e))
    }

    /// Parse JSON text. Fails on any tag or field outside the vocabulary.
    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ProtocolError::decode("ClientMessage", &e))
    }
}

impl ServerMessage {
    /// Serialize to JSON text.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProtocolError::encode("ServerMessage", &e))
    }

    /// Parse JSON text. Fails on any tag or field outside the vocabulary.
    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ProtocolError::decode("ServerMessage", &e))
    }
}
