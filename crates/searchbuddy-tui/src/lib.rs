//! Terminal UI for Searchbuddy
//!
//! A thin shell over [`searchbuddy_app::Driver`] that provides
//! terminal-specific I/O. All orchestration logic lives in the generic
//! [`searchbuddy_app::Runtime`].
//!
//! This crate only handles terminal input, rendering, and spawning the
//! network tasks.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod terminal;
pub mod ui;

pub use cli::Args;
pub use searchbuddy_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
