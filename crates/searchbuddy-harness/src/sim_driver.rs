//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`searchbuddy_app::Runtime`] orchestration code runs in both production
//! and simulation.
//!
//! Events come from two queues. Network events (channel lifecycle, frames,
//! discovery results) are produced by the driver itself in response to
//! actions and always drain first. Scripted steps are consumed only when no
//! network event is pending, so a script reads like a user reacting to the
//! screen.

use std::collections::{HashSet, VecDeque};

use searchbuddy_app::{App, AppEvent, Driver, KeyInput};
use searchbuddy_client::{ChannelEvent, Chatroom, SessionId};
use searchbuddy_proto::{ClientMessage, ProtocolError};
use thiserror::Error;

use crate::{
    invariants::{AppSnapshot, InvariantRegistry},
    sim_server::{Delivery, SimServer},
};

/// Error type for simulation driver.
#[derive(Debug, Error)]
pub enum SimDriverError {
    /// Send on a channel that is not open.
    #[error("channel {0} is not open")]
    NotOpen(SessionId),

    /// Send rejected by [`SimDriver::fail_sends`].
    #[error("send rejected")]
    SendRejected,

    /// Frame could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// One scripted step.
#[derive(Debug, Clone)]
pub enum Step {
    /// Deliver an event to the App.
    Event(AppEvent),
    /// Another chat participant sends a message to the server.
    Peer {
        /// Peer connection id. Must not collide with App session ids.
        from: SessionId,
        /// Message the peer sends.
        message: ClientMessage,
    },
    /// Server closes the channel of a session.
    ServerClose(SessionId),
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`searchbuddy_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
pub struct SimDriver {
    script: VecDeque<Step>,
    network: VecDeque<AppEvent>,
    server: SimServer,
    discovery: Result<Vec<Chatroom>, String>,
    refused: HashSet<String>,
    fail_sends: bool,
    open: HashSet<SessionId>,

    discover_requests: Vec<String>,
    opened: Vec<(SessionId, String)>,
    sent: Vec<(SessionId, ClientMessage)>,
    closed: Vec<SessionId>,
    renders: usize,
    stopped: bool,

    invariants: Option<InvariantRegistry>,
    last_snapshot: Option<AppSnapshot>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a driver with an empty script, an empty server and discovery
    /// returning no rooms.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            network: VecDeque::new(),
            server: SimServer::new(),
            discovery: Ok(Vec::new()),
            refused: HashSet::new(),
            fail_sends: false,
            open: HashSet::new(),
            discover_requests: Vec::new(),
            opened: Vec::new(),
            sent: Vec::new(),
            closed: Vec::new(),
            renders: 0,
            stopped: false,
            invariants: None,
            last_snapshot: None,
        }
    }

    /// Use `server` as the chat server.
    #[must_use]
    pub fn with_server(mut self, server: SimServer) -> Self {
        self.server = server;
        self
    }

    /// Answer every discovery with `chatrooms`.
    #[must_use]
    pub fn with_chatrooms(mut self, chatrooms: Vec<Chatroom>) -> Self {
        self.discovery = Ok(chatrooms);
        self
    }

    /// Fail every discovery with `reason`.
    #[must_use]
    pub fn with_discovery_failure(mut self, reason: impl Into<String>) -> Self {
        self.discovery = Err(reason.into());
        self
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Refuse connections to `url`.
    pub fn refuse(&mut self, url: impl Into<String>) {
        self.refused.insert(url.into());
    }

    /// Make every following send fail.
    pub fn fail_sends(&mut self) {
        self.fail_sends = true;
    }

    /// Queue a scripted step.
    pub fn push(&mut self, step: Step) {
        self.script.push_back(step);
    }

    /// Queue an event for the App.
    pub fn push_event(&mut self, event: AppEvent) {
        self.push(Step::Event(event));
    }

    /// Queue a key press.
    pub fn push_key(&mut self, key: KeyInput) {
        self.push_event(AppEvent::Key(key));
    }

    /// Queue one key press per character.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.push_key(KeyInput::Char(c));
        }
    }

    /// Chat server.
    pub fn server(&self) -> &SimServer {
        &self.server
    }

    /// Search input of every discovery request, in order.
    pub fn discover_requests(&self) -> &[String] {
        &self.discover_requests
    }

    /// Every channel opened, in order.
    pub fn opened(&self) -> &[(SessionId, String)] {
        &self.opened
    }

    /// Every message sent, in order.
    pub fn sent(&self) -> &[(SessionId, ClientMessage)] {
        &self.sent
    }

    /// Every channel closed locally, in order.
    pub fn closed(&self) -> &[SessionId] {
        &self.closed
    }

    /// Number of renders.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// True after [`Driver::stop`].
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Queue the network events for server deliveries to open channels.
    fn deliver(&mut self, deliveries: Vec<Delivery>) -> Result<(), SimDriverError> {
        for (session, message) in deliveries {
            if self.open.contains(&session) {
                let text = message.encode()?;
                self.network.push_back(AppEvent::Channel { session, event: ChannelEvent::Frame(text) });
            }
        }
        Ok(())
    }

    fn server_close(&mut self, session: SessionId) -> Result<(), SimDriverError> {
        if !self.open.remove(&session) {
            return Ok(());
        }
        self.network.push_back(AppEvent::Channel { session, event: ChannelEvent::Closed });
        let deliveries = self.server.disconnect(session);
        self.deliver(deliveries)
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            if let Some(event) = self.network.pop_front() {
                return Ok(Some(event));
            }
            match self.script.pop_front() {
                None => return Ok(None),
                Some(Step::Event(event)) => return Ok(Some(event)),
                Some(Step::Peer { from, message }) => {
                    let deliveries = self.server.handle(from, message);
                    self.deliver(deliveries)?;
                },
                Some(Step::ServerClose(session)) => self.server_close(session)?,
            }
        }
    }

    fn discover(&mut self, terms: &str) {
        self.discover_requests.push(terms.to_owned());
        let event = match &self.discovery {
            Ok(chatrooms) => AppEvent::DiscoverySucceeded { chatrooms: chatrooms.clone() },
            Err(reason) => AppEvent::DiscoveryFailed { reason: reason.clone() },
        };
        self.network.push_back(event);
    }

    fn open_channel(&mut self, session: SessionId, url: &str) {
        self.opened.push((session, url.to_owned()));

        if self.refused.contains(url) {
            let reason = format!("connection to {url} refused");
            self.network.push_back(AppEvent::Channel { session, event: ChannelEvent::Error { reason } });
            self.network.push_back(AppEvent::Channel { session, event: ChannelEvent::Closed });
            return;
        }

        self.open.insert(session);
        self.network.push_back(AppEvent::Channel { session, event: ChannelEvent::Opened });
    }

    async fn send_message(&mut self, session: SessionId, text: String) -> Result<(), Self::Error> {
        if self.fail_sends {
            return Err(SimDriverError::SendRejected);
        }
        if !self.open.contains(&session) {
            return Err(SimDriverError::NotOpen(session));
        }

        let message = ClientMessage::decode(&text)?;
        self.sent.push((session, message.clone()));

        let deliveries = self.server.handle(session, message);
        self.deliver(deliveries)
    }

    fn close_channel(&mut self, session: SessionId) {
        self.closed.push(session);
        if self.open.remove(&session) {
            let deliveries = self.server.disconnect(session);
            // Deliveries go to peers only; this session gets nothing more.
            if let Err(e) = self.deliver(deliveries) {
                tracing::warn!(error = %e, "delivery after close failed");
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.renders += 1;

        if let Some(registry) = &self.invariants {
            let snapshot = AppSnapshot::from_app(app);
            if let Some(previous) = &self.last_snapshot {
                registry.assert_all(previous, &snapshot, &format!("at render {}", self.renders));
            }
            self.last_snapshot = Some(snapshot);
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use searchbuddy_proto::ServerMessage;

    use super::*;

    fn room(id: i32) -> Chatroom {
        Chatroom {
            chatroom_id: id,
            num_users: 0,
            online: true,
            term: "t".into(),
            url: format!("ws://sim/{id}"),
        }
    }

    #[tokio::test]
    async fn network_events_drain_before_script() {
        let mut driver = SimDriver::new().with_chatrooms(vec![room(1)]);
        driver.push_key(KeyInput::Enter);

        driver.discover("cats");

        assert!(matches!(
            driver.poll_event().await.unwrap(),
            Some(AppEvent::DiscoverySucceeded { .. })
        ));
        assert_eq!(driver.poll_event().await.unwrap(), Some(AppEvent::Key(KeyInput::Enter)));
        assert_eq!(driver.poll_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn open_then_join_gets_joined_frame() {
        let mut driver = SimDriver::new();
        let session = SessionId::new(1);

        driver.open_channel(session, "ws://sim/1");
        driver.send_message(session, r#"{"type":"Join","chatroom_id":1}"#.into()).await.unwrap();

        assert_eq!(
            driver.poll_event().await.unwrap(),
            Some(AppEvent::Channel { session, event: ChannelEvent::Opened })
        );
        let Some(AppEvent::Channel { event: ChannelEvent::Frame(text), .. }) =
            driver.poll_event().await.unwrap()
        else {
            panic!("expected frame");
        };
        assert_eq!(ServerMessage::decode(&text).unwrap(), ServerMessage::Joined { chatroom_id: 1 });
    }

    #[tokio::test]
    async fn refused_channel_reports_error_then_closed() {
        let mut driver = SimDriver::new();
        let session = SessionId::new(1);
        driver.refuse("ws://sim/1");

        driver.open_channel(session, "ws://sim/1");

        assert!(matches!(
            driver.poll_event().await.unwrap(),
            Some(AppEvent::Channel { event: ChannelEvent::Error { .. }, .. })
        ));
        assert_eq!(
            driver.poll_event().await.unwrap(),
            Some(AppEvent::Channel { session, event: ChannelEvent::Closed })
        );
    }

    #[tokio::test]
    async fn send_on_unknown_channel_fails() {
        let mut driver = SimDriver::new();
        let result = driver.send_message(SessionId::new(9), "{}".into()).await;
        assert!(matches!(result, Err(SimDriverError::NotOpen(_))));
    }

    #[tokio::test]
    async fn peer_messages_reach_open_channel() {
        let mut driver = SimDriver::new();
        let session = SessionId::new(1);
        let peer = SessionId::new(100);
        driver.open_channel(session, "ws://sim/1");
        driver.send_message(session, r#"{"type":"Join","chatroom_id":1}"#.into()).await.unwrap();
        driver.push(Step::Peer { from: peer, message: ClientMessage::Join { chatroom_id: 1 } });

        let mut frames = Vec::new();
        while let Some(event) = driver.poll_event().await.unwrap() {
            if let AppEvent::Channel { event: ChannelEvent::Frame(text), .. } = event {
                frames.push(ServerMessage::decode(&text).unwrap());
            }
        }

        assert_eq!(frames, vec![
            ServerMessage::Joined { chatroom_id: 1 },
            ServerMessage::NewUser { user_id: 2 },
        ]);
    }
}
