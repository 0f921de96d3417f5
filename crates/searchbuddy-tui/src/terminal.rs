//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Discovery runs over HTTP and
//! chatroom channels over WebSocket, each on its own task reporting back
//! through one inbound queue.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use searchbuddy_app::{App, AppEvent, Driver, KeyInput};
use searchbuddy_client::{
    SessionId,
    discovery::DiscoveryClient,
    transport::{self, Channel, TransportError},
};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// No open channel for the session.
    #[error("no channel for session {0}")]
    NoChannel(SessionId),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), discovery
/// lookups (reqwest) and the chatroom channel (tokio-tungstenite). At most
/// one channel is open at a time.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    inbound_tx: mpsc::UnboundedSender<AppEvent>,
    inbound_rx: mpsc::UnboundedReceiver<AppEvent>,
    discovery: DiscoveryClient,
    channel: Option<(SessionId, Channel)>,
}

impl TerminalDriver {
    /// Create a new terminal driver talking to the discovery `server`.
    ///
    /// Switches the terminal to raw mode and the alternate screen; both are
    /// restored on drop.
    pub fn new(server: &str) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            inbound_tx,
            inbound_rx,
            discovery: DiscoveryClient::new(server),
            channel: None,
        })
    }

    fn close_current(&mut self) {
        if let Some((session, channel)) = self.channel.take() {
            tracing::debug!(%session, "closing channel");
            channel.close();
        }
    }
}

/// Convert a crossterm key press to a [`KeyInput`].
///
/// Ctrl+U clears the line; other control chords are ignored.
pub fn convert_key(key: KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') => Some(KeyInput::ClearLine),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            tokio::select! {
                biased;

                // Network results
                Some(event) = self.inbound_rx.recv() => return Ok(Some(event)),

                // Terminal events
                maybe_event = self.event_stream.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(input) = convert_key(key) {
                            return Ok(Some(AppEvent::Key(input)));
                        }
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        return Ok(Some(AppEvent::Resize(cols, rows)));
                    },
                    Some(Ok(_)) => {},
                    Some(Err(e)) => return Err(TerminalError::Io(e)),
                    None => return Ok(None),
                },
            }
        }
    }

    fn discover(&mut self, terms: &str) {
        let client = self.discovery.clone();
        let tx = self.inbound_tx.clone();
        let terms = terms.to_owned();

        tokio::spawn(async move {
            let event = match client.lookup(&terms).await {
                Ok(chatrooms) => {
                    tracing::info!(%terms, found = chatrooms.len(), "discovery complete");
                    AppEvent::DiscoverySucceeded { chatrooms }
                },
                Err(e) => {
                    tracing::warn!(%terms, error = %e, "discovery failed");
                    AppEvent::DiscoveryFailed { reason: e.to_string() }
                },
            };
            let _ = tx.send(event);
        });
    }

    fn open_channel(&mut self, session: SessionId, url: &str) {
        self.close_current();

        let tx = self.inbound_tx.clone();
        let channel = transport::connect(url.to_owned(), move |event| {
            let _ = tx.send(AppEvent::Channel { session, event });
        });
        tracing::info!(%session, %url, "opening channel");
        self.channel = Some((session, channel));
    }

    async fn send_message(&mut self, session: SessionId, text: String) -> Result<(), Self::Error> {
        match &self.channel {
            Some((id, channel)) if *id == session => Ok(channel.send(text)?),
            _ => Err(TerminalError::NoChannel(session)),
        }
    }

    fn close_channel(&mut self, session: SessionId) {
        if self.channel.as_ref().is_some_and(|(id, _)| *id == session) {
            self.close_current();
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some((_, channel)) = self.channel.take() {
            channel.abort();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
