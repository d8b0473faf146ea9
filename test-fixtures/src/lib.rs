//! Shared builders and scripted collaborator stubs for tests across the
//! workspace. The stubs make the full state machine testable without a
//! live oracle: `ScriptedOracle` replays a fixed response sequence per
//! call count, `StaticFetcher` serves canned document text.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use lacuna_core::errors::{FetchError, OracleError};
use lacuna_core::facts::FactValue;
use lacuna_core::models::{ConfidenceLabel, ContentFormat, OracleResponse, RawDocument};
use lacuna_core::timeline::{Event, EventKind, Timeline};
use lacuna_core::traits::{FetchedDocument, IContentFetcher, IExtractionOracle, IReferencePrimer};

/// Shorthand date constructor for tests.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// An event with no facts filled in.
pub fn bare_event(kind: EventKind, anchor: Option<NaiveDate>, description: &str) -> Event {
    Event::new(kind, anchor, description)
}

/// An event with the given facts pre-populated (structured-record state).
pub fn event_with_facts(
    kind: EventKind,
    anchor: Option<NaiveDate>,
    description: &str,
    facts: &[(&str, FactValue)],
) -> Event {
    let mut event = Event::new(kind, anchor, description);
    for (name, value) in facts {
        event.facts.insert(name.to_string(), value.clone());
    }
    event
}

/// A single-subject timeline.
pub fn timeline(subject_id: &str, events: Vec<Event>) -> Timeline {
    Timeline::new(subject_id, events)
}

/// A text-format raw document with distinct content bytes.
pub fn text_document(
    type_hint: &str,
    description: &str,
    document_date: Option<NaiveDate>,
    content: &str,
) -> RawDocument {
    RawDocument {
        id: Uuid::new_v4(),
        type_hint: type_hint.to_string(),
        description: description.to_string(),
        document_date,
        format: ContentFormat::Text,
        content: content.as_bytes().to_vec(),
    }
}

/// Build an oracle response from (key, value) pairs.
pub fn oracle_response(pairs: &[(&str, FactValue)], confidence: ConfidenceLabel) -> OracleResponse {
    let fields: BTreeMap<String, FactValue> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    OracleResponse {
        fields,
        confidence,
        excerpt: None,
    }
}

/// One scripted oracle step.
pub enum ScriptedCall {
    Respond(OracleResponse),
    Malformed,
    Unavailable,
}

/// Deterministic oracle stub: returns scripted results in call order.
/// Panics if invoked more times than the script covers — a test that
/// over-calls has its escalation math wrong.
pub struct ScriptedOracle {
    script: Vec<ScriptedCall>,
    cursor: Mutex<usize>,
    /// Prompts received, for assertions on prompt construction.
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn new(script: Vec<ScriptedCall>) -> Self {
        Self {
            script,
            cursor: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// How many calls the oracle has served.
    pub fn calls(&self) -> usize {
        *self.cursor.lock().expect("cursor lock")
    }
}

impl IExtractionOracle for ScriptedOracle {
    fn invoke(&self, prompt: &str, _document_text: &str) -> Result<OracleResponse, OracleError> {
        let mut cursor = self.cursor.lock().expect("cursor lock");
        let index = *cursor;
        *cursor += 1;
        drop(cursor);
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());

        match self.script.get(index) {
            Some(ScriptedCall::Respond(response)) => Ok(response.clone()),
            Some(ScriptedCall::Malformed) => Err(OracleError::Malformed {
                detail: format!("scripted malformed output at call {index}"),
            }),
            Some(ScriptedCall::Unavailable) => Err(OracleError::Unavailable {
                detail: format!("scripted outage at call {index}"),
            }),
            None => panic!("oracle invoked {} times but script has {}", index + 1, self.script.len()),
        }
    }
}

/// Fetcher stub serving canned text per document id. Unknown ids fail
/// with `NotFound`, exercising the fetch-failure path.
#[derive(Default)]
pub struct StaticFetcher {
    texts: HashMap<Uuid, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, document_id: Uuid, text: &str) -> Self {
        self.texts.insert(document_id, text.to_string());
        self
    }

    /// Serve every document in the slice with its content as the text.
    pub fn serving(documents: &[RawDocument]) -> Self {
        let mut fetcher = Self::new();
        for doc in documents {
            fetcher.texts.insert(
                doc.id,
                String::from_utf8_lossy(&doc.content).into_owned(),
            );
        }
        fetcher
    }
}

impl IContentFetcher for StaticFetcher {
    fn fetch(&self, document_id: Uuid) -> Result<FetchedDocument, FetchError> {
        match self.texts.get(&document_id) {
            Some(text) => Ok(FetchedDocument {
                text: text.clone(),
                format: ContentFormat::Text,
            }),
            None => Err(FetchError::NotFound {
                document_id: document_id.to_string(),
            }),
        }
    }
}

/// Primer stub returning a fixed context string for any tags.
pub struct StaticPrimer(pub String);

impl IReferencePrimer for StaticPrimer {
    fn primer_for(&self, _tags: &[&str]) -> Option<String> {
        Some(self.0.clone())
    }
}
