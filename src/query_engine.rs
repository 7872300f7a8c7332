//! Catalog query engine
//!
//! Filter, sort and paginate the in-memory plant list for the gallery:
//! - Free text: case-insensitive substring over common name, scientific name,
//!   family, type and native region (any field matching is enough)
//! - Type: case-insensitive equality, `"all"` disables it
//! - Sort: stable, locale-style ascending on one field
//! - Pagination: "load more" reveals `PAGE_SIZE` more results each time
//!
//! Every function here is pure over a borrowed slice. Re-running on each
//! keystroke is cheap and never observes a half-built result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::PlantRecord;
use crate::utils::locale_compare;

/// Results revealed initially and per "load more".
pub const PAGE_SIZE: usize = 6;

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Scientific,
    Type,
    Family,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Name, SortKey::Scientific, SortKey::Type, SortKey::Family];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Scientific => "scientific",
            SortKey::Type => "type",
            SortKey::Family => "family",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Common Name",
            SortKey::Scientific => "Scientific Name",
            SortKey::Type => "Plant Type",
            SortKey::Family => "Family",
        }
    }

    fn field<'a>(&self, plant: &'a PlantRecord) -> &'a str {
        match self {
            SortKey::Name => &plant.common_name,
            SortKey::Scientific => &plant.scientific_name,
            SortKey::Type => &plant.plant_type,
            SortKey::Family => &plant.family,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "scientific" => Ok(SortKey::Scientific),
            "type" => Ok(SortKey::Type),
            "family" => Ok(SortKey::Family),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plant type filter. `All` is the `"all"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    /// Blank or `"all"` (any case) disables the filter.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            TypeFilter::All
        } else {
            TypeFilter::Only(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeFilter::All => Self::ALL_SENTINEL,
            TypeFilter::Only(t) => t,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TypeFilter::All)
    }

    /// Whether `plant_type` passes. Full Unicode case folding, so the gallery's
    /// selected option agrees with what the filter lets through.
    pub fn accepts(&self, plant_type: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => plant_type.to_lowercase() == t.to_lowercase(),
        }
    }

    fn matches(&self, plant: &PlantRecord) -> bool {
        self.accepts(&plant.plant_type)
    }
}

/// Free text + type filter + sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub text: String,
    pub type_filter: TypeFilter,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn new(text: impl Into<String>, type_filter: TypeFilter, sort: SortKey) -> Self {
        Self {
            text: text.into(),
            type_filter,
            sort,
        }
    }

    /// Both filters, AND-ed.
    pub fn matches(&self, plant: &PlantRecord) -> bool {
        matches_text(plant, &self.text.trim().to_lowercase()) && self.type_filter.matches(plant)
    }
}

/// `needle` must already be trimmed and lowercased. Empty matches everything.
fn matches_text(plant: &PlantRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [
        &plant.common_name,
        &plant.scientific_name,
        &plant.family,
        &plant.plant_type,
        &plant.native_region,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

// ============================================================================
// Query
// ============================================================================

/// Filter and sort `plants`. Equal sort keys keep their input order.
pub fn query<'a>(plants: &'a [PlantRecord], params: &CatalogQuery) -> Vec<&'a PlantRecord> {
    let needle = params.text.trim().to_lowercase();

    let mut results: Vec<&PlantRecord> = plants
        .iter()
        .filter(|p| matches_text(p, &needle) && params.type_filter.matches(p))
        .collect();

    // `sort_by` is stable
    results.sort_by(|a, b| locale_compare(params.sort.field(a), params.sort.field(b)));

    tracing::debug!(
        "Query text={:?} type={} sort={} matched {}/{}",
        params.text,
        params.type_filter.as_str(),
        params.sort,
        results.len(),
        plants.len()
    );

    results
}

// ============================================================================
// Pagination
// ============================================================================

/// Incremental reveal cursor for the "Load More" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    visible_count: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            visible_count: PAGE_SIZE,
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume at a given count (e.g. from a URL). Never below one page.
    pub fn with_visible(visible_count: usize) -> Self {
        Self {
            visible_count: visible_count.max(PAGE_SIZE),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Reveal one more page. Safe to call past the end.
    pub fn load_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(PAGE_SIZE);
    }

    /// The count after one more "load more".
    pub fn next_visible_count(&self) -> usize {
        self.visible_count.saturating_add(PAGE_SIZE)
    }

    pub fn page<'r, T>(&self, results: &'r [T]) -> Page<'r, T> {
        let end = self.visible_count.min(results.len());
        Page {
            items: &results[..end],
            total: results.len(),
            visible_count: self.visible_count,
            has_more: self.visible_count < results.len(),
        }
    }
}

/// The visible prefix of a query result.
#[derive(Debug)]
pub struct Page<'r, T> {
    pub items: &'r [T],
    pub total: usize,
    pub visible_count: usize,
    pub has_more: bool,
}
