//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: navigation state machine
//! - [`Driver`]: Platform-specific I/O

use searchbuddy_client::{ChannelEvent, ClientMessage, SessionId};

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// Events are processed one at a time; the App is never re-entered while an
/// event is being handled.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    initial_terms: Option<String>,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime. `initial_terms` is searched for on start.
    pub fn new(driver: D, initial_terms: Option<String>) -> Self {
        Self { driver, app: App::new(), initial_terms }
    }

    /// Run the main event loop until quit or until the driver runs dry.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll or render.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let actions = self.app.start(self.initial_terms.take());
        let mut quit = self.process_actions(actions).await?;

        while !quit {
            let Some(event) = self.driver.poll_event().await? else {
                tracing::debug!("event source exhausted");
                break;
            };
            let actions = self.app.handle(event);
            quit = self.process_actions(actions).await?;
        }

        self.driver.stop();
        Ok(())
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Discover { terms } => self.driver.discover(&terms),
                    AppAction::OpenChannel { session, url } => {
                        self.driver.open_channel(session, &url);
                    },
                    AppAction::Send { session, message } => {
                        if let Some(reason) = self.send(session, &message).await {
                            tracing::warn!(%session, %reason, "send failed");
                            let event = AppEvent::Channel {
                                session,
                                event: ChannelEvent::Error { reason },
                            };
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                    AppAction::CloseChannel { session } => self.driver.close_channel(session),
                }
            }
        }
        Ok(false)
    }

    /// Encode and send one message. Returns the failure reason, if any.
    async fn send(&mut self, session: SessionId, message: &ClientMessage) -> Option<String> {
        let text = match message.encode() {
            Ok(text) => text,
            Err(e) => return Some(e.to_string()),
        };
        self.driver.send_message(session, text).await.err().map(|e| e.to_string())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
