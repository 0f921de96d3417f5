//! Wire format for Searchbuddy chatrooms.
//!
//! Every message on a chat channel is a UTF-8 JSON object whose `"type"` field
//! selects the variant. The two directions use disjoint vocabularies:
//! [`ClientMessage`] flows from client to server and [`ServerMessage`] from
//! server to client. Room discovery returns a JSON array of [`Chatroom`]
//! records.
//!
//! # Security
//!
//! Decoding fails closed. An unknown tag, a missing tag, or a missing or
//! mistyped field yields [`ProtocolError::Decode`]; nothing is coerced into a
//! default. Callers treat a decode failure as a broken channel, not as a
//! message to skip.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chatroom;
pub mod discovery;
pub mod errors;
pub mod message;

pub use chatroom::Chatroom;
pub use errors::{ProtocolError, Result};
pub use message::{ClientMessage, ServerMessage};
