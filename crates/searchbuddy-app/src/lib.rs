//! Application layer for Searchbuddy
//!
//! Pure state machines and generic runtime for navigation and session
//! orchestration, enabling deterministic simulation testing with the same
//! code that runs in production.
//!
//! # Components
//!
//! - [`App`]: navigation state machine (search, room choice, chat, failure)
//! - [`SearchStatus`]: context-keyed search-status tracker
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod error;
mod event;
mod input;
mod runtime;
mod state;
mod status;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use error::AppError;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::AppState;
pub use status::{ContextId, Indicator, SearchStatus};
