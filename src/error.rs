//! Load-time errors for the bundled reference data
//!
//! Request-time conditions (unknown id, empty result, translation failure,
//! missing image) are not errors; see the individual modules.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate plant id {0} in dataset")]
    DuplicateId(u32),

    #[error("duplicate plant id {0} in image table")]
    DuplicateImageId(u32),

    #[error("image table key {0:?} is not a plant id")]
    InvalidImageKey(String),

    #[error("duplicate language code {0:?}")]
    DuplicateLanguage(String),
}

/// Read a bundled data file into a string.
pub(crate) fn read_data_file(path: &std::path::Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}
