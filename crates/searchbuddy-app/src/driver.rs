//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use searchbuddy_client::SessionId;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in production TUI and simulation.
///
/// Long-running operations (`discover`, `open_channel`) start work and
/// return immediately; their outcome comes back through
/// [`poll_event`](Driver::poll_event) as [`AppEvent`]s.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, WebSocket channels, HTTP discovery
/// - **Simulation**: scripted events and an in-memory chat server
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next event.
    ///
    /// Returns `None` once the event source is exhausted.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Start a chatroom lookup for raw search input.
    ///
    /// Completion is reported as `DiscoverySucceeded` or `DiscoveryFailed`.
    fn discover(&mut self, terms: &str);

    /// Open the channel for `session`.
    ///
    /// Lifecycle events are reported as `AppEvent::Channel` tagged with
    /// `session`.
    fn open_channel(&mut self, session: SessionId, url: &str);

    /// Write a text frame to the channel of `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is gone or the write fails.
    fn send_message(
        &mut self,
        session: SessionId,
        text: String,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Close the channel of `session`. No events follow for it.
    fn close_channel(&mut self, session: SessionId);

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Clean up resources.
    fn stop(&mut self);
}
