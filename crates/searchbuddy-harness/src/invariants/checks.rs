//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{AppSnapshot, Invariant, InvariantKind, InvariantResult, Violation};

/// `Failed` is absorbing.
///
/// Once the App is in `Failed`, it stays there with the same message.
pub struct FailedAbsorbing;

impl Invariant for FailedAbsorbing {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FailedAbsorbing
    }

    fn check(&self, before: &AppSnapshot, after: &AppSnapshot) -> InvariantResult {
        match (&before.failed_message, &after.failed_message) {
            (Some(old), Some(new)) if old != new => Err(Violation {
                invariant: self.kind(),
                message: format!("failure message changed from {old:?} to {new:?}"),
            }),
            (Some(_), None) => Err(Violation {
                invariant: self.kind(),
                message: format!("left Failed for {}", after.state),
            }),
            _ => Ok(()),
        }
    }
}

/// The chat log of a session only grows, and never reorders.
pub struct LogAppendOnly;

impl Invariant for LogAppendOnly {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LogAppendOnly
    }

    fn check(&self, before: &AppSnapshot, after: &AppSnapshot) -> InvariantResult {
        let (Some(old), Some(new)) = (&before.session, &after.session) else {
            return Ok(());
        };
        if old.id != new.id || new.log.starts_with(&old.log) {
            return Ok(());
        }
        Err(Violation {
            invariant: self.kind(),
            message: format!("session {}: log {:?} rewritten to {:?}", new.id, old.log, new.log),
        })
    }
}

/// The room-list cursor points into the list (or the list is empty).
pub struct SelectionInBounds;

impl Invariant for SelectionInBounds {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SelectionInBounds
    }

    fn check(&self, _before: &AppSnapshot, after: &AppSnapshot) -> InvariantResult {
        match after.selection {
            Some((selected, len)) if len > 0 && selected >= len => Err(Violation {
                invariant: self.kind(),
                message: format!("cursor {selected} outside list of {len}"),
            }),
            _ => Ok(()),
        }
    }
}

/// A new session always gets a larger id than the one it replaces.
pub struct SessionIdsIncrease;

impl Invariant for SessionIdsIncrease {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SessionIdsIncrease
    }

    fn check(&self, before: &AppSnapshot, after: &AppSnapshot) -> InvariantResult {
        match (&before.session, &after.session) {
            (Some(old), Some(new)) if new.id < old.id => Err(Violation {
                invariant: self.kind(),
                message: format!("session {} replaced by older session {}", old.id, new.id),
            }),
            _ => Ok(()),
        }
    }
}
