//! Common test utilities for integration tests
//!
//! Provides location fixtures built through provider normalization and a
//! scripted `LocationLookup` whose responses are released by the test.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use skyroute::domain::errors::ProviderOperation;
use skyroute::infrastructure::provider::normalize_candidates;
use skyroute::{Location, LocationLookup, LookupResponse, ProviderError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

pub type Reply = Result<LookupResponse, ProviderError>;

/// One raw provider candidate record.
pub fn raw_candidate(entity_id: &str, title: &str, subtitle: &str, sky_id: &str) -> Value {
    json!({
        "entityId": entity_id,
        "skyId": sky_id,
        "presentation": {
            "title": title,
            "subtitle": subtitle,
            "suggestionTitle": format!("{title} ({sky_id})"),
        }
    })
}

/// Lookup body in the provider's wire shape.
pub fn lookup_body(candidates: &[Value]) -> Value {
    json!({ "status": true, "data": candidates })
}

/// Build locations the way the provider client does.
pub fn locations(candidates: &[Value]) -> Vec<Location> {
    normalize_candidates(&lookup_body(candidates))
}

pub fn london_candidates() -> Vec<Value> {
    vec![
        raw_candidate("27544008", "London", "United Kingdom", "LOND"),
        raw_candidate("95565050", "London Heathrow", "United Kingdom", "LHR"),
    ]
}

pub fn found(locations: Vec<Location>) -> Reply {
    Ok(LookupResponse {
        candidates: locations,
    })
}

/// Lookup whose responses are released per query through oneshot gates.
///
/// Queries without a gate resolve immediately with zero candidates.
#[derive(Default)]
pub struct ScriptedLookup {
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    asked: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the response to `query` until the returned sender fires.
    pub fn gate(&self, query: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(query.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }
}

#[async_trait]
impl LocationLookup for ScriptedLookup {
    async fn search(&self, query: &str) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.asked.lock().push(query.to_string());
        let gate = self.gates.lock().remove(query);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ProviderError::unknown(ProviderOperation::LocationLookup))),
            None => Ok(LookupResponse::default()),
        }
    }
}
