//! Deterministic simulation harness for Searchbuddy testing.
//!
//! Scripted implementations of the [`searchbuddy_app::Driver`] trait and of
//! the chat server, so the production [`searchbuddy_app::Runtime`] can be
//! driven end to end without a network or a terminal.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! App invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_server;

pub use invariants::{
    AppSnapshot, FailedAbsorbing, Invariant, InvariantKind, InvariantRegistry, InvariantResult,
    LogAppendOnly, SelectionInBounds, SessionIdsIncrease, SessionSnapshot, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError, Step};
pub use sim_server::SimServer;
