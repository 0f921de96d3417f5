//! Search-status tracking.
//!
//! Each search context (a search box, a browser tab, a pane) records the most
//! recent search content it saw. The indicator reflects the active context
//! only. Contexts exist between [`SearchStatus::open`] and
//! [`SearchStatus::close`]; recording into an unknown context is ignored.

use std::collections::HashMap;

/// Identifies one search context.
pub type ContextId = u64;

/// Binary search-status signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indicator {
    /// No current search term.
    #[default]
    Idle,
    /// A non-empty search term is waiting to be looked up.
    Pending,
}

impl Indicator {
    /// Indicator for the current term of the active context.
    pub fn for_term(term: Option<&str>) -> Self {
        match term {
            Some(term) if !term.is_empty() => Self::Pending,
            _ => Self::Idle,
        }
    }
}

/// Context-keyed store of the latest search content.
#[derive(Debug, Clone, Default)]
pub struct SearchStatus {
    terms: HashMap<ContextId, Option<String>>,
    active: Option<ContextId>,
}

impl SearchStatus {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a context. No-op if already open.
    pub fn open(&mut self, context: ContextId) {
        self.terms.entry(context).or_insert(None);
    }

    /// Stop tracking a context and forget its content.
    pub fn close(&mut self, context: ContextId) {
        self.terms.remove(&context);
        if self.active == Some(context) {
            self.active = None;
        }
    }

    /// Make `context` the one the indicator reflects.
    ///
    /// Focus may move to a context before anything was recorded for it.
    pub fn activate(&mut self, context: ContextId) {
        self.active = Some(context);
    }

    /// Record new search content for an open context.
    pub fn record(&mut self, context: ContextId, content: impl Into<String>) {
        match self.terms.get_mut(&context) {
            Some(slot) => *slot = Some(content.into()),
            None => tracing::debug!(context, "search recorded for unknown context"),
        }
    }

    /// Indicator for the active context.
    pub fn indicator(&self) -> Indicator {
        Indicator::for_term(self.active_terms())
    }

    /// Latest content of the active context.
    pub fn active_terms(&self) -> Option<&str> {
        self.active.and_then(|ctx| self.terms.get(&ctx)).and_then(|t| t.as_deref())
    }
}
