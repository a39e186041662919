//! Query lifecycle types shared by the session and the view.

use serde::Serialize;
use std::fmt;

use super::location::Location;
use crate::domain::errors::ProviderError;

/// Lifecycle phase of the field's current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    /// No text, text below the minimum length, or a selection was just made.
    Idle,
    /// Text changed and is waiting for the debounce quiet period.
    Pending,
    /// A lookup is outstanding for the current request.
    Loading,
    /// The current request returned at least one candidate.
    Ready,
    /// The current request returned zero candidates.
    Empty,
    /// The current request failed.
    Failed,
}

impl QueryPhase {
    /// Stable snake_case name used in logs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Empty => "empty",
            Self::Failed => "failed",
        }
    }

    /// Ready, Empty and Failed only change on a new query or a selection.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Empty | Self::Failed)
    }
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one issued lookup. Only used to tell the latest request apart
/// from stale ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LookupRequest {
    seq: u64,
    query: String,
}

impl LookupRequest {
    pub(crate) fn new(seq: u64, query: impl Into<String>) -> Self {
        Self {
            seq,
            query: query.into(),
        }
    }

    /// Sequence number, increasing per session.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Trimmed text sent to the provider.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// The live query state of one selection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    /// Raw text as last typed.
    pub text: String,
    /// Current lifecycle phase.
    pub phase: QueryPhase,
    /// Candidates of exactly one request; replaced wholesale, never appended.
    pub candidates: Vec<Location>,
    /// Failure of the current request, set only in the failed phase.
    pub error: Option<ProviderError>,
}

impl QueryState {
    /// Empty idle state.
    pub fn idle() -> Self {
        Self {
            text: String::new(),
            phase: QueryPhase::Idle,
            candidates: Vec::new(),
            error: None,
        }
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(QueryPhase::Ready.is_terminal());
        assert!(QueryPhase::Empty.is_terminal());
        assert!(QueryPhase::Failed.is_terminal());
        assert!(!QueryPhase::Idle.is_terminal());
        assert!(!QueryPhase::Pending.is_terminal());
        assert!(!QueryPhase::Loading.is_terminal());
    }

    #[test]
    fn test_idle_state_is_empty() {
        let state = QueryState::default();
        assert_eq!(state.phase, QueryPhase::Idle);
        assert!(state.text.is_empty());
        assert!(state.candidates.is_empty());
        assert!(state.error.is_none());
    }
}
