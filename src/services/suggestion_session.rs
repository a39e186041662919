//! Race-safe lifecycle of "the current lookup" for one selection field.
//!
//! Every issued lookup is tagged with a monotonically increasing sequence
//! number. A response is applied only while its request is still the
//! session's current request; anything else is stale and silently dropped.
//! Stale lookups are not aborted at the network layer, they simply have no
//! observable effect. This gives at most one terminal phase per logical
//! query, and it is always the most recent query's, whatever order the
//! provider answers in.
//!
//! ```text
//!            start_query(len < min)            select / clear
//!   ┌──────────────────────────────┐    ┌───────────────────────┐
//!   ▼                              │    ▼                       │
//! Idle ──start_query──▶ Loading(seq) ──resolve(seq)──▶ Ready | Empty | Failed
//!                          ▲                                  │
//!                          └────────── start_query ───────────┘
//! ```

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, Instrument};

use super::query_debouncer::DEFAULT_DEBOUNCE;
use crate::domain::errors::{ProviderError, SelectionError};
use crate::domain::models::{Location, LookupConfig, LookupRequest, QueryPhase, QueryState};
use crate::domain::ports::{LocationLookup, LookupResponse};

/// Shortest trimmed query that issues a lookup when none is configured.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Debounce and minimum-length policy shared by a session and its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupPolicy {
    /// Quiet period before typed text starts a lookup.
    pub debounce: Duration,
    /// Shortest trimmed query, in characters, that is looked up.
    pub min_query_len: usize,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

impl From<&LookupConfig> for LookupPolicy {
    fn from(config: &LookupConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_query_len: config.min_query_len,
        }
    }
}

/// Everything the view needs to render one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Text, phase, candidates and error of the current query.
    pub query: QueryState,
    /// The committed value, if any.
    pub selection: Option<Location>,
    /// The authoritative request, if one has been issued since the last
    /// reset to idle.
    pub request: Option<LookupRequest>,
}

/// Result of [`SuggestionSession::start_query`].
#[derive(Debug)]
pub enum QueryDispatch {
    /// Query too short; the session is idle and no lookup was issued.
    BelowMinimumLength,
    /// A lookup was issued. The handle resolves once its response has been
    /// applied or discarded.
    Issued {
        /// The request now authoritative for the session.
        request: LookupRequest,
        /// Lookup task; yields what happened to its response.
        handle: JoinHandle<Resolution>,
    },
}

impl QueryDispatch {
    /// The issued request, if any.
    pub fn request(&self) -> Option<&LookupRequest> {
        match self {
            Self::BelowMinimumLength => None,
            Self::Issued { request, .. } => Some(request),
        }
    }

    /// Wait for the issued lookup to finish. `None` when nothing was issued
    /// or the lookup task did not run to completion.
    pub async fn resolution(self) -> Option<Resolution> {
        match self {
            Self::BelowMinimumLength => None,
            Self::Issued { handle, .. } => handle.await.ok(),
        }
    }
}

/// What happened to a lookup response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response belonged to the current request and moved the session
    /// into this terminal phase.
    Applied(QueryPhase),
    /// A newer query, a selection or a clear superseded the request.
    Stale,
}

struct SessionState {
    next_seq: u64,
    snapshot: SessionSnapshot,
    /// Locations of the most recent ready list. Replaced by the next ready
    /// list and emptied by a clear.
    offered: HashSet<Location>,
    initial: Option<Location>,
}

struct Shared {
    state: Mutex<SessionState>,
    renders: watch::Sender<SessionSnapshot>,
}

impl Shared {
    fn publish(&self, snapshot: &SessionSnapshot) {
        self.renders.send_replace(snapshot.clone());
    }

    fn apply(
        &self,
        request: &LookupRequest,
        outcome: Result<LookupResponse, ProviderError>,
    ) -> Resolution {
        let mut state = self.state.lock();

        let is_current = state.snapshot.request.as_ref() == Some(request)
            && state.snapshot.query.phase == QueryPhase::Loading;
        if !is_current {
            debug!(
                seq = request.seq(),
                current = ?state.snapshot.request.as_ref().map(LookupRequest::seq),
                "discarding stale lookup response"
            );
            return Resolution::Stale;
        }

        let query = &mut state.snapshot.query;
        match outcome {
            Ok(response) if response.candidates.is_empty() => {
                query.phase = QueryPhase::Empty;
                query.candidates = Vec::new();
                query.error = None;
            }
            Ok(response) => {
                query.phase = QueryPhase::Ready;
                query.candidates = response.candidates;
                query.error = None;
            }
            Err(error) => {
                query.phase = QueryPhase::Failed;
                query.candidates = Vec::new();
                query.error = Some(error);
            }
        }
        let phase = query.phase;

        if phase == QueryPhase::Ready {
            let offered = state.snapshot.query.candidates.iter().cloned().collect();
            state.offered = offered;
        }

        debug!(
            seq = request.seq(),
            phase = %phase,
            candidates = state.snapshot.query.candidates.len(),
            "lookup applied"
        );
        self.publish(&state.snapshot);
        Resolution::Applied(phase)
    }
}

/// Owns the current in-flight lookup of one field and publishes every state
/// change to subscribers.
///
/// Lookups are spawned on the ambient tokio runtime. Sessions are
/// independent: two fields never share state.
pub struct SuggestionSession {
    lookup: Arc<dyn LocationLookup>,
    policy: LookupPolicy,
    shared: Arc<Shared>,
}

impl SuggestionSession {
    /// Create an empty session.
    pub fn new(lookup: Arc<dyn LocationLookup>, policy: LookupPolicy) -> Self {
        Self::with_initial(lookup, policy, None)
    }

    /// Create a session whose field starts out resolved to `initial`.
    pub fn with_initial(
        lookup: Arc<dyn LocationLookup>,
        policy: LookupPolicy,
        initial: Option<Location>,
    ) -> Self {
        let snapshot = SessionSnapshot {
            selection: initial.clone(),
            ..SessionSnapshot::default()
        };
        let (renders, _) = watch::channel(snapshot.clone());

        Self {
            lookup,
            policy,
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState {
                    next_seq: 0,
                    snapshot,
                    offered: HashSet::new(),
                    initial,
                }),
                renders,
            }),
        }
    }

    /// Debounce and minimum-length policy of this session.
    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    /// Start a lookup for `text`, superseding any outstanding one.
    ///
    /// Always clears the selection. Text shorter than the minimum length
    /// (after trimming) moves the session to idle without a lookup.
    pub fn start_query(&self, text: &str) -> QueryDispatch {
        let query = text.trim();
        let mut state = self.shared.state.lock();
        state.snapshot.selection = None;

        if query.chars().count() < self.policy.min_query_len {
            if let Some(stale) = state.snapshot.request.take() {
                debug!(seq = stale.seq(), "query below minimum length, outstanding lookup is stale");
            }
            state.snapshot.query = QueryState {
                text: text.to_string(),
                ..QueryState::idle()
            };
            self.shared.publish(&state.snapshot);
            return QueryDispatch::BelowMinimumLength;
        }

        state.next_seq += 1;
        let request = LookupRequest::new(state.next_seq, query);
        state.snapshot.request = Some(request.clone());
        state.snapshot.query = QueryState {
            text: text.to_string(),
            phase: QueryPhase::Loading,
            candidates: Vec::new(),
            error: None,
        };
        self.shared.publish(&state.snapshot);
        drop(state);

        debug!(seq = request.seq(), query = %request.query(), "issuing lookup");

        let lookup = Arc::clone(&self.lookup);
        let shared = Arc::clone(&self.shared);
        let task_request = request.clone();
        let span = info_span!("lookup", seq = request.seq(), query = %request.query());
        let handle = tokio::spawn(
            async move {
                let outcome = lookup.search(task_request.query()).await;
                shared.apply(&task_request, outcome)
            }
            .instrument(span),
        );

        QueryDispatch::Issued { request, handle }
    }

    /// Record typed-but-unsettled text.
    ///
    /// An outstanding lookup stays authoritative, so a loading session keeps
    /// its phase; otherwise the phase becomes pending. Candidates are kept
    /// until the next request replaces them.
    pub fn mark_pending(&self, text: &str) {
        let mut state = self.shared.state.lock();
        state.snapshot.query.text = text.to_string();
        if state.snapshot.query.phase != QueryPhase::Loading {
            state.snapshot.query.phase = QueryPhase::Pending;
        }
        self.shared.publish(&state.snapshot);
    }

    /// Commit `location` as the selection and return to idle.
    ///
    /// Works in any phase; an outstanding lookup becomes stale. The location
    /// must be in the most recent ready list of this session or be the
    /// initial value.
    pub fn select(&self, location: &Location) -> Result<(), SelectionError> {
        let mut state = self.shared.state.lock();

        let known = state.offered.contains(location) || state.initial.as_ref() == Some(location);
        if !known {
            return Err(SelectionError::NotOffered(location.id().to_string()));
        }

        if let Some(stale) = state.snapshot.request.take() {
            debug!(seq = stale.seq(), "selection made, outstanding lookup is stale");
        }
        state.snapshot.query = QueryState::idle();
        state.snapshot.selection = Some(location.clone());
        self.shared.publish(&state.snapshot);

        debug!(id = %location.id(), code = %location.code(), "location selected");
        Ok(())
    }

    /// Clear text, candidates, offered locations and selection; any
    /// outstanding lookup becomes stale.
    pub fn clear(&self) {
        let mut state = self.shared.state.lock();
        state.snapshot = SessionSnapshot::default();
        state.offered.clear();
        self.shared.publish(&state.snapshot);
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.state.lock().snapshot.clone()
    }

    /// Current query phase.
    pub fn phase(&self) -> QueryPhase {
        self.shared.state.lock().snapshot.query.phase
    }

    /// Current committed value.
    pub fn selection(&self) -> Option<Location> {
        self.shared.state.lock().snapshot.selection.clone()
    }

    /// Receive every published snapshot, starting from the current one.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.renders.subscribe()
    }
}
