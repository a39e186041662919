//! Lookup, selection and search form services.

pub mod query_debouncer;
pub mod search_form;
pub mod selection_field;
pub mod suggestion_session;

pub use query_debouncer::QueryDebouncer;
pub use search_form::SearchForm;
pub use selection_field::{FieldView, SelectionField, Suggestion};
pub use suggestion_session::{
    LookupPolicy, QueryDispatch, Resolution, SessionSnapshot, SuggestionSession,
};
