//! Plant Catalog
//!
//! Read-only catalog of plant species with client-style query, paging and
//! on-demand translation of plant records.
//!
//! - `catalog`: loading and id lookup over the bundled `plants.json`
//! - `query_engine`: text/type filter, stable locale-aware sort, load-more paging
//! - `translate`: recursive per-leaf translation through MyMemory
//! - `images`, `languages`, `featured`: image table, language list, carousel window
//! - `api_server`, `web` (feature `api`): Axum JSON endpoints and Askama pages

pub mod catalog;
pub mod config;
pub mod error;
pub mod featured;
pub mod images;
pub mod languages;
pub mod model;
pub mod query_engine;
pub mod translate;
pub mod utils;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::ServerConfig;
pub use error::CatalogError;
pub use images::ImageCatalog;
pub use model::PlantRecord;
pub use query_engine::{query, CatalogQuery, Page, Pager, SortKey, TypeFilter, PAGE_SIZE};
pub use translate::{TranslateError, TranslationBackend, TranslationSession, Translator};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
