//! Utility modules for the catalog
//!
//! Contains shared functionality used across the query engine and the pages:
//! - Collation: locale-style sort keys for plant names
//! - Text: preview truncation for long descriptions

pub mod collation;
pub mod text;

// Re-export commonly used helpers
pub use collation::{collation_key, locale_compare};
pub use text::truncate_preview;
