//! Client
//!
//! Action-based state machine for one Searchbuddy chatroom session. Owns the
//! lifecycle of a single channel (connect, join, active, closed), turns
//! inbound server messages into chat-log lines and surfaces unrecoverable
//! conditions to the caller.
//!
//! # Architecture
//!
//! The session is Sans-IO. It receives events ([`SessionEvent`]), processes
//! them through pure transition logic ([`transition`]), and returns actions
//! ([`SessionAction`]) for the caller to execute.
//!
//! # Components
//!
//! - [`Session`]: one chatroom connection and its chat log
//! - [`SessionState`]: the `Connecting`/`Active`/`Disconnected` lifecycle
//! - [`Composer`]: editable text buffer used for message composition
//! - [`SessionEvent`]/[`ChannelEvent`]: events fed into the session
//! - [`SessionAction`]: actions produced by the session
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::connect`]: open a WebSocket channel
//! - [`discovery::DiscoveryClient`]: HTTP chatroom discovery

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composer;
mod error;
mod event;
mod session;

#[cfg(feature = "transport")]
pub mod discovery;
#[cfg(feature = "transport")]
pub mod transport;

pub use composer::{Composer, Edit};
pub use error::SessionError;
pub use event::{ChannelEvent, SessionAction, SessionEvent};
pub use searchbuddy_proto::{Chatroom, ClientMessage, ServerMessage};
pub use session::{Inbound, Session, SessionId, SessionState, transition};
