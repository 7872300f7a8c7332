//! Recursive content translator
//!
//! Walks a `serde_json::Value` and translates every string leaf:
//! - String: one backend call, or one per sentence when over the chunk threshold
//! - Array: element by element, same order and length
//! - Object: value by value, same key set
//! - Number / Bool / Null: unchanged
//!
//! Calls are strictly sequential (one in flight) so the external service sees
//! bounded load. A failed call never aborts the walk: that leaf keeps its
//! original text and the failure is logged and counted.

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::backend::TranslationBackend;
use super::chunking::{needs_chunking, split_sentences};
use crate::languages::SOURCE_LANGUAGE;
use crate::model::PlantRecord;

/// Record fields holding references rather than prose. They are never sent
/// to the backend and come back unchanged.
const UNTRANSLATED_FIELDS: &[&str] = &["images"];

/// Per-run counters (diagnostics only; never changes the output shape).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    /// Backend calls issued
    pub requested: usize,
    /// Calls that failed and fell back to the original text
    pub failed: usize,
}

/// A translated value plus how the run went.
#[derive(Debug, Clone)]
pub struct Translated<T> {
    pub value: T,
    pub report: TranslationReport,
}

#[derive(Clone)]
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
}

impl Translator {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// Target languages that need no work at all.
    pub fn is_passthrough(target_lang: &str) -> bool {
        target_lang.trim().eq_ignore_ascii_case(SOURCE_LANGUAGE)
    }

    /// Translate any nested value into `target_lang`.
    ///
    /// For the source language this returns a copy of `value` without
    /// touching the backend.
    pub async fn translate_value(&self, value: &Value, target_lang: &str) -> Translated<Value> {
        let mut report = TranslationReport::default();

        if Self::is_passthrough(target_lang) {
            return Translated {
                value: value.clone(),
                report,
            };
        }

        let value = self.walk(value, target_lang, &mut report).await;

        if report.failed > 0 {
            tracing::warn!(
                "Translation to {} finished with {}/{} leaf failures (originals kept)",
                target_lang,
                report.failed,
                report.requested
            );
        } else {
            tracing::debug!("Translation to {} finished ({} calls)", target_lang, report.requested);
        }

        Translated { value, report }
    }

    /// Translate one string with the same leaf rule the walk uses.
    pub async fn translate_text(&self, text: &str, target_lang: &str) -> Translated<String> {
        let mut report = TranslationReport::default();
        let value = if Self::is_passthrough(target_lang) {
            text.to_string()
        } else {
            self.translate_leaf(text, target_lang, &mut report).await
        };
        Translated { value, report }
    }

    /// Translate a plant record. Only prose string fields change; ids, flags,
    /// image references and the presence of optional fields are preserved.
    pub async fn translate_record(
        &self,
        plant: &PlantRecord,
        target_lang: &str,
    ) -> Result<Translated<PlantRecord>, serde_json::Error> {
        let mut content = serde_json::to_value(plant)?;
        let kept: Vec<(String, Value)> = match content.as_object_mut() {
            Some(fields) => UNTRANSLATED_FIELDS
                .iter()
                .filter_map(|key| fields.remove(*key).map(|v| (key.to_string(), v)))
                .collect(),
            None => Vec::new(),
        };

        let translated = self.translate_value(&content, target_lang).await;

        let mut value = translated.value;
        if let Some(fields) = value.as_object_mut() {
            fields.extend(kept);
        }
        Ok(Translated {
            value: serde_json::from_value(value)?,
            report: translated.report,
        })
    }

    fn walk<'a>(
        &'a self,
        value: &'a Value,
        target_lang: &'a str,
        report: &'a mut TranslationReport,
    ) -> BoxFuture<'a, Value> {
        Box::pin(async move {
            match value {
                Value::String(text) => Value::String(self.translate_leaf(text, target_lang, report).await),
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.walk(item, target_lang, &mut *report).await);
                    }
                    Value::Array(out)
                }
                Value::Object(fields) => {
                    let mut out = Map::new();
                    for (key, field) in fields {
                        let translated = self.walk(field, target_lang, &mut *report).await;
                        out.insert(key.clone(), translated);
                    }
                    Value::Object(out)
                }
                Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
            }
        })
    }

    /// Leaf rule. Long strings recurse once per sentence; a string that does
    /// not split into several sentences is sent whole.
    fn translate_leaf<'a>(
        &'a self,
        text: &'a str,
        target_lang: &'a str,
        report: &'a mut TranslationReport,
    ) -> BoxFuture<'a, String> {
        Box::pin(async move {
            if text.is_empty() {
                return String::new();
            }

            if needs_chunking(text) {
                let sentences = split_sentences(text);
                if sentences.len() > 1 {
                    let mut translated = Vec::with_capacity(sentences.len());
                    for sentence in sentences {
                        translated.push(self.translate_leaf(sentence, target_lang, &mut *report).await);
                    }
                    return translated.join(" ");
                }
            }

            report.requested += 1;
            match self.backend.translate(text, SOURCE_LANGUAGE, target_lang).await {
                Ok(translated) => translated,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!("Translation to {} failed, keeping original text: {}", target_lang, e);
                    text.to_string()
                }
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::super::backend::{TranslateError, TranslationBackend};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory backend: `[lang] text`, recording every call. Texts listed
    /// in `fail_on` return an error instead.
    #[derive(Default)]
    pub struct RecordingBackend {
        pub calls: Mutex<Vec<String>>,
        pub fail_on: Vec<String>,
    }

    impl RecordingBackend {
        pub fn failing_on(texts: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: texts.iter().map(|s| s.to_string()).collect(),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranslationBackend for RecordingBackend {
        async fn translate(&self, text: &str, _source_lang: &str, target_lang: &str) -> Result<String, TranslateError> {
            self.calls.lock().unwrap().push(text.to_string());
            if self.fail_on.iter().any(|f| f == text) {
                return Err(TranslateError::HttpStatus(500));
            }
            Ok(format!("[{}] {}", target_lang, text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;
    use crate::model::fixtures::plant;
    use serde_json::json;

    fn translator(backend: &Arc<RecordingBackend>) -> Translator {
        Translator::new(backend.clone())
    }

    /// Same keys and array lengths at every level; string leaves may differ.
    fn same_shape(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::String(_), Value::String(_)) => true,
            (Value::Array(x), Value::Array(y)) => x.len() == y.len() && x.iter().zip(y).all(|(p, q)| same_shape(p, q)),
            (Value::Object(x), Value::Object(y)) => {
                x.len() == y.len() && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| same_shape(v, w)))
            }
            _ => a == b,
        }
    }

    #[tokio::test]
    async fn test_nested_record_two_calls() {
        let backend = Arc::new(RecordingBackend::default());
        let input = json!({ "common_name": "Neem", "uses": { "medicinal": "Treats fever" } });

        let out = translator(&backend).translate_value(&input, "hi").await;

        assert_eq!(backend.calls().len(), 2);
        assert_eq!(out.report, TranslationReport { requested: 2, failed: 0 });
        assert_eq!(
            out.value,
            json!({ "common_name": "[hi] Neem", "uses": { "medicinal": "[hi] Treats fever" } })
        );
    }

    #[tokio::test]
    async fn test_english_is_identity_without_calls() {
        let backend = Arc::new(RecordingBackend::default());
        let input = json!({ "a": ["x", 1, true, null], "b": { "c": "y" } });

        let out = translator(&backend).translate_value(&input, "en").await;

        assert_eq!(out.value, input);
        assert!(backend.calls().is_empty());
        assert_eq!(out.report.requested, 0);
    }

    #[tokio::test]
    async fn test_non_strings_pass_through() {
        let backend = Arc::new(RecordingBackend::default());
        let input = json!({ "id": 7, "flag": false, "none": null, "ratio": 0.5, "empty": "" });

        let out = translator(&backend).translate_value(&input, "fr").await;

        assert_eq!(out.value, input);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_shape_preserved() {
        let backend = Arc::new(RecordingBackend::default());
        let input = json!({
            "facts": ["one", "two", ["three", { "deep": "four" }]],
            "care": { "water": "Low", "pruning": null },
            "count": 3
        });

        let out = translator(&backend).translate_value(&input, "ta").await;

        assert!(same_shape(&input, &out.value));
        assert_eq!(out.value["facts"][2][1]["deep"], "[ta] four");
        assert_eq!(out.value["count"], 3);
    }

    #[tokio::test]
    async fn test_array_order_preserved() {
        let backend = Arc::new(RecordingBackend::default());
        let input = json!(["c", "a", "b"]);

        let out = translator(&backend).translate_value(&input, "de").await;

        assert_eq!(out.value, json!(["[de] c", "[de] a", "[de] b"]));
        assert_eq!(backend.calls(), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_leaf_failure_keeps_original_and_siblings() {
        let backend = Arc::new(RecordingBackend::failing_on(&["Bel"]));
        let input = json!(["Arjun", "Bel", "Kusum"]);

        let out = translator(&backend).translate_value(&input, "mr").await;

        assert_eq!(out.value, json!(["[mr] Arjun", "Bel", "[mr] Kusum"]));
        assert_eq!(out.report, TranslationReport { requested: 3, failed: 1 });
    }

    #[tokio::test]
    async fn test_long_string_chunked_by_sentence() {
        let backend = Arc::new(RecordingBackend::default());
        let first = format!("{}.", "a".repeat(250));
        let second = format!("{}!", "b".repeat(250));
        let text = format!("{} {}", first, second);

        let out = translator(&backend).translate_text(&text, "hi").await;

        assert_eq!(backend.calls(), vec![first.clone(), second.clone()]);
        assert_eq!(out.value, format!("[hi] {} [hi] {}", first, second));
    }

    #[tokio::test]
    async fn test_failed_chunk_keeps_its_original_text() {
        let first = format!("{}.", "a".repeat(250));
        let second = format!("{}?", "b".repeat(250));
        let backend = Arc::new(RecordingBackend::failing_on(&[second.as_str()]));
        let text = format!("{} {}", first, second);

        let out = translator(&backend).translate_text(&text, "hi").await;

        assert_eq!(out.value, format!("[hi] {} {}", first, second));
        assert_eq!(out.report.failed, 1);
    }

    #[tokio::test]
    async fn test_long_single_sentence_sent_whole() {
        let backend = Arc::new(RecordingBackend::default());
        let text = "c".repeat(500);

        let out = translator(&backend).translate_text(&text, "hi").await;

        assert_eq!(backend.calls().len(), 1);
        assert_eq!(out.value, format!("[hi] {}", text));
    }

    #[tokio::test]
    async fn test_translate_record_preserves_structure() {
        let backend = Arc::new(RecordingBackend::default());
        let mut neem = plant(9, "Neem", "Azadirachta indica", "Meliaceae", "Tree", "India");
        neem.uses.medicinal = Some("Treats fever".to_string());
        neem.environmental.air_purifying = true;

        let out = translator(&backend).translate_record(&neem, "hi").await.unwrap();

        assert_eq!(out.value.id, 9);
        assert!(out.value.environmental.air_purifying);
        assert_eq!(out.value.common_name, "[hi] Neem");
        assert_eq!(out.value.uses.medicinal.as_deref(), Some("[hi] Treats fever"));
        assert!(out.value.uses.culinary.is_none());
        // Original untouched
        assert_eq!(neem.common_name, "Neem");
    }

    #[tokio::test]
    async fn test_translate_record_skips_image_references() {
        let backend = Arc::new(RecordingBackend::default());
        let mut palas = plant(1, "Palas", "Butea monosperma", "Fabaceae", "Tree", "India");
        palas.images = vec!["/images/palas-1.jpg".to_string(), "/images/palas-2.jpg".to_string()];

        let out = translator(&backend).translate_record(&palas, "mr").await.unwrap();

        assert_eq!(out.value.images, palas.images);
        assert_eq!(out.value.common_name, "[mr] Palas");
        assert!(backend.calls().iter().all(|c| !c.starts_with("/images/")));
        assert_eq!(out.report.failed, 0);
    }
}
