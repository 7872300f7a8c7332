//! Content translation
//!
//! Translates arbitrary nested content (a plant record as `serde_json::Value`)
//! string leaf by string leaf through an external translation service.
//!
//! - `backend`: the per-string service seam and its error type
//! - `mymemory`: HTTP client for the public MyMemory endpoint
//! - `chunking`: sentence splitting for long strings
//! - `translator`: the recursive traversal with per-leaf fallback
//! - `session`: latest-request-wins slot for a view's translated content

pub mod backend;
pub mod chunking;
pub mod mymemory;
pub mod session;
pub mod translator;

pub use backend::{TranslateError, TranslationBackend};
pub use chunking::{split_sentences, CHUNK_THRESHOLD};
pub use mymemory::MyMemoryClient;
pub use session::{Ticket, TranslationSession, TranslationState};
pub use translator::{TranslationReport, Translated, Translator};
