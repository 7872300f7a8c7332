//! Latest-request-wins slot for a view's translated content
//!
//! A view shows either its previous content or a fully translated copy, never
//! a partial one. Each translation is started with `begin()`, which hands out
//! a ticket carrying a generation number. When it resolves, `complete()` only
//! applies the result if no newer request was issued in the meantime; a
//! superseded result is dropped.
//!
//! State: `Idle` → `Translating` (on `begin`) → `Idle` (on the latest
//! request's `complete` or `fail`, or on `reset`).
//!
//! This is library API for stateful callers that keep one view open while
//! its language changes (a desktop or TUI front end, a websocket push).
//! The HTTP server does not use it: each request there is translated on its
//! own and cached per `(id, lang)`, so there is no long-lived view to guard.

use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

use super::translator::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
    Idle,
    Translating,
}

/// Handle for one issued translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    language: String,
}

impl Ticket {
    pub fn language(&self) -> &str {
        &self.language
    }
}

struct Slot<T> {
    /// Generation of the most recently issued request
    latest: u64,
    state: TranslationState,
    content: Arc<T>,
    language: String,
}

pub struct TranslationSession<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> TranslationSession<T> {
    /// Start idle, showing `original` in the source language.
    pub fn new(original: T) -> Self {
        Self {
            slot: Mutex::new(Slot {
                latest: 0,
                state: TranslationState::Idle,
                content: Arc::new(original),
                language: crate::languages::SOURCE_LANGUAGE.to_string(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        // Slot updates are single assignments; a poisoned lock still holds a
        // consistent value.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Issue a new request, superseding any in flight.
    pub fn begin(&self, language: &str) -> Ticket {
        let mut slot = self.lock();
        slot.latest += 1;
        slot.state = TranslationState::Translating;
        Ticket {
            generation: slot.latest,
            language: language.to_string(),
        }
    }

    /// Apply a finished translation. Returns `false` (and changes nothing)
    /// when a newer request has been issued since `ticket`.
    pub fn complete(&self, ticket: Ticket, content: T) -> bool {
        let mut slot = self.lock();
        if ticket.generation != slot.latest {
            tracing::debug!(
                "Discarding stale translation (generation {} < {})",
                ticket.generation,
                slot.latest
            );
            return false;
        }
        slot.content = Arc::new(content);
        slot.language = ticket.language;
        slot.state = TranslationState::Idle;
        true
    }

    /// The latest request failed as a whole; keep the current content.
    pub fn fail(&self, ticket: &Ticket) -> bool {
        let mut slot = self.lock();
        if ticket.generation != slot.latest {
            return false;
        }
        slot.state = TranslationState::Idle;
        true
    }

    /// Language went back to the source: show `original` now and discard
    /// anything still in flight.
    pub fn reset(&self, original: T) {
        let mut slot = self.lock();
        slot.latest += 1;
        slot.content = Arc::new(original);
        slot.language = crate::languages::SOURCE_LANGUAGE.to_string();
        slot.state = TranslationState::Idle;
    }

    pub fn state(&self) -> TranslationState {
        self.lock().state
    }

    pub fn content(&self) -> Arc<T> {
        self.lock().content.clone()
    }

    pub fn language(&self) -> String {
        self.lock().language.clone()
    }
}

impl TranslationSession<Value> {
    /// Translate `original` into `language` and apply it if still current.
    /// Returns whether the result was applied.
    pub async fn translate(&self, translator: &Translator, original: &Value, language: &str) -> bool {
        if Translator::is_passthrough(language) {
            self.reset(original.clone());
            return true;
        }

        let ticket = self.begin(language);
        let translated = translator.translate_value(original, language).await;
        self.complete(ticket, translated.value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::translator::testing::RecordingBackend;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_begin_complete_cycle() {
        let session = TranslationSession::new("Neem".to_string());
        assert_eq!(session.state(), TranslationState::Idle);

        let ticket = session.begin("hi");
        assert_eq!(session.state(), TranslationState::Translating);
        // Previous content visible while translating
        assert_eq!(*session.content(), "Neem");

        assert!(session.complete(ticket, "नीम".to_string()));
        assert_eq!(session.state(), TranslationState::Idle);
        assert_eq!(*session.content(), "नीम");
        assert_eq!(session.language(), "hi");
    }

    #[test]
    fn test_stale_result_discarded() {
        let session = TranslationSession::new("Neem".to_string());

        let first = session.begin("hi");
        let second = session.begin("ta");

        // Second resolves first
        assert!(session.complete(second, "வேம்பு".to_string()));
        // First resolves late and must not overwrite
        assert!(!session.complete(first, "नीम".to_string()));

        assert_eq!(*session.content(), "வேம்பு");
        assert_eq!(session.language(), "ta");
    }

    #[test]
    fn test_still_translating_until_latest_resolves() {
        let session = TranslationSession::new(0u32);
        let first = session.begin("hi");
        let second = session.begin("mr");

        assert!(!session.complete(first, 1));
        assert_eq!(session.state(), TranslationState::Translating);

        assert!(session.complete(second, 2));
        assert_eq!(session.state(), TranslationState::Idle);
    }

    #[test]
    fn test_reset_supersedes_in_flight() {
        let session = TranslationSession::new("Neem".to_string());
        let ticket = session.begin("hi");

        session.reset("Neem".to_string());

        assert!(!session.complete(ticket, "नीम".to_string()));
        assert_eq!(*session.content(), "Neem");
        assert_eq!(session.language(), "en");
        assert_eq!(session.state(), TranslationState::Idle);
    }

    #[test]
    fn test_fail_returns_to_idle_keeping_content() {
        let session = TranslationSession::new("Neem".to_string());
        let ticket = session.begin("hi");

        assert!(session.fail(&ticket));
        assert_eq!(session.state(), TranslationState::Idle);
        assert_eq!(*session.content(), "Neem");
    }

    #[tokio::test]
    async fn test_translate_applies_full_result() {
        let backend = Arc::new(RecordingBackend::default());
        let translator = Translator::new(backend.clone());
        let original = json!({ "common_name": "Neem", "facts": ["Bitter"] });
        let session = TranslationSession::new(original.clone());

        assert!(session.translate(&translator, &original, "hi").await);
        assert_eq!(
            *session.content(),
            json!({ "common_name": "[hi] Neem", "facts": ["[hi] Bitter"] })
        );

        // Back to English: original again, no further calls
        assert!(session.translate(&translator, &original, "en").await);
        assert_eq!(*session.content(), original);
        assert_eq!(backend.calls().len(), 2);
    }
}
