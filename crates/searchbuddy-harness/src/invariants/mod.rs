//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during system execution.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible execution paths.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from the App into an
//! [`AppSnapshot`], then runs registered [`Invariant`] checks against each
//! pair of consecutive snapshots. Violations trigger panics with detailed
//! context for debugging.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let before = AppSnapshot::from_app(&app);
//! app.handle(event);
//! registry.assert_all(&before, &AppSnapshot::from_app(&app), "after event");
//! ```

mod checks;
mod snapshot;

pub use checks::{FailedAbsorbing, LogAppendOnly, SelectionInBounds, SessionIdsIncrease};
pub use snapshot::{AppSnapshot, SessionSnapshot};
use thiserror::Error;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// See [`FailedAbsorbing`].
    FailedAbsorbing,
    /// See [`LogAppendOnly`].
    LogAppendOnly,
    /// See [`SelectionInBounds`].
    SelectionInBounds,
    /// See [`SessionIdsIncrease`].
    SessionIdsIncrease,
}

/// Invariant violation with context.
#[derive(Debug, Clone, Error)]
#[error("{invariant:?}: {message}")]
pub struct Violation {
    /// The violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// An invariant that can be checked across one state transition.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant identity for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant across the transition `before` to `after`.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, before: &AppSnapshot, after: &AppSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against a transition.
/// Use [`InvariantRegistry::standard()`] for the common App invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard App invariants.
    ///
    /// Includes:
    /// - [`FailedAbsorbing`]: `Failed` is never left
    /// - [`LogAppendOnly`]: chat logs only grow
    /// - [`SelectionInBounds`]: room cursor stays in the list
    /// - [`SessionIdsIncrease`]: session ids never go back
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(FailedAbsorbing);
        registry.add(LogAppendOnly);
        registry.add(SelectionInBounds);
        registry.add(SessionIdsIncrease);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants across a transition.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, before: &AppSnapshot, after: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(before, after).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic, reason = "test harness assertion")]
    pub fn assert_all(&self, before: &AppSnapshot, after: &AppSnapshot, context: &str) {
        if let Err(violations) = self.check_all(before, after) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
