//! Interactive location field: text input, debounced lookups and a
//! suggestion list that resolves to one [`Location`].

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use super::query_debouncer::QueryDebouncer;
use super::suggestion_session::{LookupPolicy, SessionSnapshot, SuggestionSession};
use crate::domain::errors::SelectionError;
use crate::domain::models::{Location, QueryPhase};
use crate::domain::ports::LocationLookup;

/// Shown when the current lookup returned nothing.
pub const NO_RESULTS_MESSAGE: &str =
    "No airports found. Try searching for a city name or airport code.";

/// Shown while a lookup is in flight.
pub const LOADING_MESSAGE: &str = "Searching airports...";

/// One row of the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// `London (LOND)`
    pub label: String,
    /// `London, United Kingdom`
    pub detail: String,
    /// Whether this row is the field's current value.
    pub selected: bool,
}

/// What the suggestion area of the field currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldView {
    /// Nothing below the field.
    Closed,
    /// A lookup is in flight.
    Loading,
    /// An empty-result or failure message.
    Message {
        /// Text to show.
        text: String,
        /// Whether the message reports a failed lookup.
        is_error: bool,
    },
    /// Suggestions of the current request.
    List {
        /// Rows in provider order.
        suggestions: Vec<Suggestion>,
    },
}

/// A text field bound to its own [`SuggestionSession`].
///
/// Keystrokes go to a [`QueryDebouncer`]; settled text starts a lookup;
/// activating a list row commits that location as the field's value.
pub struct SelectionField {
    id: Uuid,
    label: String,
    session: Arc<SuggestionSession>,
    debouncer: QueryDebouncer,
    text: String,
    open: bool,
}

impl SelectionField {
    /// Create an empty field.
    pub fn new(label: impl Into<String>, lookup: Arc<dyn LocationLookup>, policy: LookupPolicy) -> Self {
        Self::with_value(label, lookup, policy, None)
    }

    /// Create a field that starts out resolved to `value`.
    pub fn with_value(
        label: impl Into<String>,
        lookup: Arc<dyn LocationLookup>,
        policy: LookupPolicy,
        value: Option<Location>,
    ) -> Self {
        let id = Uuid::new_v4();
        let label = label.into();
        let session = Arc::new(SuggestionSession::with_initial(lookup, policy, value));

        let mut debouncer = QueryDebouncer::new(policy.debounce);
        let settle_session = Arc::clone(&session);
        let settle_label = label.clone();
        debouncer.on_settle(move |text| {
            let dispatch = settle_session.start_query(&text);
            debug!(
                field = %id,
                label = %settle_label,
                seq = ?dispatch.request().map(|r| r.seq()),
                "settled query dispatched"
            );
        });

        Self {
            id,
            label,
            session,
            debouncer,
            text: String::new(),
            open: false,
        }
    }

    /// Unique id attached to this field's log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Field label, e.g. "From".
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The session driving this field's lookups.
    pub fn session(&self) -> &SuggestionSession {
        &self.session
    }

    /// The field's resolved value.
    pub fn value(&self) -> Option<Location> {
        self.session.selection()
    }

    /// Whether the suggestion area may be shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Replace the field text with `text`, as if the user had typed it.
    ///
    /// Empty text clears the value immediately; anything else waits for the
    /// debounce quiet period before a lookup is started.
    pub fn input(&mut self, text: &str) {
        self.text = text.to_string();
        self.open = true;

        if text.is_empty() {
            self.debouncer.cancel();
            self.session.clear();
            debug!(field = %self.id, "field cleared by input");
            return;
        }

        self.session.mark_pending(text);
        self.debouncer.observe(text);
    }

    /// Open the suggestion area.
    pub fn focus(&mut self) {
        self.open = true;
    }

    /// Close the list (escape or click outside). The value is unchanged.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Commit the suggestion at `index` of the visible list.
    pub fn activate(&mut self, index: usize) -> Result<Location, SelectionError> {
        let snapshot = self.session.snapshot();
        if snapshot.query.phase != QueryPhase::Ready {
            return Err(SelectionError::NoSuchCandidate(index));
        }
        let location = snapshot
            .query
            .candidates
            .get(index)
            .cloned()
            .ok_or(SelectionError::NoSuchCandidate(index))?;

        self.debouncer.cancel();
        self.session.select(&location)?;
        self.text.clear();
        self.open = false;

        debug!(field = %self.id, id = %location.id(), "suggestion activated");
        Ok(location)
    }

    /// Drop text, suggestions and value.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.text.clear();
        self.session.clear();
    }

    /// Text the input shows: the value's label once resolved, else the typed text.
    pub fn display_text(&self) -> String {
        self.session
            .selection()
            .map_or_else(|| self.text.clone(), |location| location.label())
    }

    /// Render the suggestion area from the current snapshot.
    pub fn view(&self) -> FieldView {
        render(&self.session.snapshot(), &self.text, self.open, self.session.policy())
    }

    /// Snapshots published by the underlying session.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.session.subscribe()
    }
}

fn render(snapshot: &SessionSnapshot, text: &str, open: bool, policy: LookupPolicy) -> FieldView {
    let query = &snapshot.query;
    let long_enough = text.chars().count() >= policy.min_query_len;
    if !open || !(long_enough || !query.candidates.is_empty()) {
        return FieldView::Closed;
    }

    match query.phase {
        QueryPhase::Loading => FieldView::Loading,
        QueryPhase::Failed => FieldView::Message {
            text: query
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_default(),
            is_error: true,
        },
        QueryPhase::Empty => FieldView::Message {
            text: NO_RESULTS_MESSAGE.to_string(),
            is_error: false,
        },
        QueryPhase::Ready | QueryPhase::Pending | QueryPhase::Idle if !query.candidates.is_empty() => {
            let selected = snapshot.selection.as_ref().map(Location::id);
            FieldView::List {
                suggestions: query
                    .candidates
                    .iter()
                    .map(|location| Suggestion {
                        label: location.label(),
                        detail: location.detail(),
                        selected: selected == Some(location.id()),
                    })
                    .collect(),
            }
        }
        _ => FieldView::Closed,
    }
}
