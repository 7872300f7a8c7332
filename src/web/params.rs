//! Gallery URL parameters
//!
//! `/gallery?search=neem&type=tree&sort=family&visible=12&view=list`
//!
//! Every parameter is optional and parsed leniently: an unknown sort key
//! falls back to `name`, a missing type to `all`, a bad `visible` to one page,
//! anything but `list` to the grid view.
//! The canonical form leaves defaults out so shared links stay short, and
//! drops `search` when it is blank.

use serde::Deserialize;

use crate::query_engine::{CatalogQuery, Pager, SortKey, TypeFilter, PAGE_SIZE};

pub const GALLERY_PATH: &str = "/gallery";

/// Card grid or one-per-row list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("list") {
            ViewMode::List
        } else {
            ViewMode::Grid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GalleryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub visible: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
}

impl GalleryParams {
    pub fn search_text(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn type_filter(&self) -> TypeFilter {
        TypeFilter::parse(self.plant_type.as_deref().unwrap_or(""))
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort.as_deref().and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.as_deref().map(ViewMode::parse).unwrap_or_default()
    }

    /// Same view in another layout.
    pub fn with_view(&self, mode: ViewMode) -> Self {
        Self {
            view: Some(mode.as_str().to_string()),
            ..self.clone()
        }
    }

    pub fn visible_count(&self) -> usize {
        self.pager().visible_count()
    }

    pub fn pager(&self) -> Pager {
        let visible = self
            .visible
            .as_deref()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(PAGE_SIZE);
        Pager::with_visible(visible)
    }

    pub fn query(&self) -> CatalogQuery {
        CatalogQuery::new(self.search_text(), self.type_filter(), self.sort_key())
    }

    /// Same view with one more page revealed.
    pub fn load_more(&self) -> Self {
        Self {
            visible: Some(self.pager().next_visible_count().to_string()),
            ..self.clone()
        }
    }

    /// "Clear all filters": text and type reset, sort and layout kept.
    pub fn cleared(&self) -> Self {
        Self {
            sort: self.sort.clone(),
            view: self.view.clone(),
            ..Self::default()
        }
    }

    /// Canonical query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();

        let search = self.search_text();
        if !search.trim().is_empty() {
            pairs.push(format!("search={}", urlencoding::encode(search)));
        }

        let type_filter = self.type_filter();
        if !type_filter.is_all() {
            pairs.push(format!("type={}", urlencoding::encode(&type_filter.as_str().to_lowercase())));
        }

        let sort = self.sort_key();
        if sort != SortKey::default() {
            pairs.push(format!("sort={}", sort));
        }

        let visible = self.visible_count();
        if visible != PAGE_SIZE {
            pairs.push(format!("visible={}", visible));
        }

        let view = self.view_mode();
        if view != ViewMode::default() {
            pairs.push(format!("view={}", view.as_str()));
        }

        pairs.join("&")
    }

    /// Shareable gallery link for this view.
    pub fn href(&self) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            GALLERY_PATH.to_string()
        } else {
            format!("{}?{}", GALLERY_PATH, qs)
        }
    }
}
