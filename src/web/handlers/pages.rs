// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::api_server::{parse_id, AppState};
use crate::featured::{Carousel, AUTO_ADVANCE, DEFAULT_PER_SLIDE};
use crate::images::{GalleryImage, ImageCatalog};
use crate::languages::{self, SOURCE_LANGUAGE};
use crate::model::PlantRecord;
use crate::query_engine::{query, SortKey, TypeFilter};
use crate::web::{GalleryParams, ViewMode};

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template error: {}", e);
        format!("Template error: {}", e)
    }))
}

// ============================================================================
// Shared view models
// ============================================================================

/// Summary card used by the home carousel and the gallery grid.
pub struct PlantCard {
    pub href: String,
    pub image: String,
    pub common_name: String,
    pub scientific_name: String,
    pub family: String,
    pub plant_type: String,
    pub native_region: String,
    pub height: String,
    pub growth_rate: String,
    pub air_purifying: bool,
    pub pollinator_support: bool,
    pub badges: Vec<&'static str>,
}

impl PlantCard {
    fn new(plant: &PlantRecord, images: &ImageCatalog) -> Self {
        Self {
            href: format!("/plant/{}", plant.id),
            image: images.get_image(plant.id, 0).to_string(),
            common_name: plant.common_name.clone(),
            scientific_name: plant.scientific_name.clone(),
            family: plant.family.clone(),
            plant_type: plant.plant_type.clone(),
            native_region: plant.native_region.clone(),
            height: plant.description.height.clone(),
            growth_rate: plant.description.growth_rate.clone(),
            air_purifying: plant.environmental.air_purifying,
            pollinator_support: plant.environmental.pollinator_support,
            // Medicinal / Ornamental / Culinary only on cards
            badges: plant.uses.badges().into_iter().filter(|b| *b != "Religious").collect(),
        }
    }
}

/// `<option>` in a filter / language select.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub plant_count: usize,
    pub cards: Vec<PlantCard>,
    pub navigable: bool,
    pub prev_slide: usize,
    pub next_slide: usize,
    pub dots: Vec<SlideDot>,
    pub auto_advance_ms: u128,
}

pub struct SlideDot {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    slide: Option<usize>,
}

pub async fn home_page(State(state): State<AppState>, Query(params): Query<HomeQuery>) -> impl IntoResponse {
    let plants = state.catalog.plants();
    let carousel = Carousel::at(plants.len(), DEFAULT_PER_SLIDE, params.slide.unwrap_or(0));

    let template = HomeTemplate {
        title: "Plant Catalog".to_string(),
        plant_count: plants.len(),
        cards: carousel
            .visible(plants)
            .iter()
            .map(|p| PlantCard::new(p, &state.images))
            .collect(),
        navigable: carousel.is_navigable(),
        prev_slide: carousel.prev_index(),
        next_slide: carousel.next_index(),
        dots: carousel
            .positions()
            .map(|index| SlideDot {
                index,
                active: index == carousel.index(),
            })
            .collect(),
        auto_advance_ms: AUTO_ADVANCE.as_millis(),
    };
    render(&template)
}

// ============================================================================
// Gallery Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/gallery.html")]
pub struct GalleryTemplate {
    pub title: String,
    pub search: String,
    pub type_options: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    pub cards: Vec<PlantCard>,
    pub shown: usize,
    pub total: usize,
    pub has_more: bool,
    pub load_more_href: String,
    pub clear_href: String,
    /// `grid` or `list`, used as a CSS class
    pub view: String,
    pub grid_href: String,
    pub list_href: String,
}

/// "All Types" followed by the catalog's types; the active filter is selected.
fn type_select_options(types: &[&str], type_filter: &TypeFilter) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: TypeFilter::ALL_SENTINEL.to_string(),
        label: "All Types".to_string(),
        selected: type_filter.is_all(),
    }];
    options.extend(types.iter().map(|t| SelectOption {
        value: t.to_lowercase(),
        label: t.to_string(),
        selected: !type_filter.is_all() && type_filter.accepts(t),
    }));
    options
}

pub async fn gallery_page(State(state): State<AppState>, Query(params): Query<GalleryParams>) -> impl IntoResponse {
    let results = query(state.catalog.plants(), &params.query());
    let page = params.pager().page(&results);

    let type_options = type_select_options(&state.catalog.plant_types(), &params.type_filter());

    let sort = params.sort_key();
    let sort_options = SortKey::ALL
        .iter()
        .map(|k| SelectOption {
            value: k.as_str().to_string(),
            label: k.label().to_string(),
            selected: *k == sort,
        })
        .collect();

    let template = GalleryTemplate {
        title: "Plant Gallery".to_string(),
        search: params.search_text().to_string(),
        type_options,
        sort_options,
        cards: page.items.iter().map(|p| PlantCard::new(p, &state.images)).collect(),
        shown: page.items.len(),
        total: page.total,
        has_more: page.has_more,
        load_more_href: params.load_more().href(),
        clear_href: params.cleared().href(),
        view: params.view_mode().as_str().to_string(),
        grid_href: params.with_view(ViewMode::Grid).href(),
        list_href: params.with_view(ViewMode::List).href(),
    };
    render(&template)
}

// ============================================================================
// Plant Detail Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/plant.html")]
pub struct PlantTemplate {
    pub title: String,
    /// Displayed (possibly translated) content
    pub plant: PlantRecord,
    pub hero_image: String,
    pub extra_images: Vec<String>,
    /// Decided on the English record; the sentinel no longer matches once translated
    pub show_precaution: bool,
    pub language: String,
    pub language_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct PlantPageQuery {
    lang: Option<String>,
}

pub async fn plant_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PlantPageQuery>,
) -> Response {
    let Some(original) = parse_id(&id).and_then(|id| state.catalog.get(id)) else {
        let template = NotFoundTemplate {
            title: "Plant Not Found".to_string(),
            message: "The plant you're looking for doesn't exist.".to_string(),
        };
        return (StatusCode::NOT_FOUND, render(&template)).into_response();
    };

    let language = params
        .lang
        .as_deref()
        .and_then(languages::find)
        .map(|l| l.code)
        .unwrap_or(SOURCE_LANGUAGE);

    let plant = if language == SOURCE_LANGUAGE {
        original.clone()
    } else {
        match state.translated_plant(original.id, language).await {
            Ok(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("Translated plant {} did not parse back: {}", original.id, e);
                original.clone()
            }),
            Err(e) => {
                tracing::warn!("Showing plant {} untranslated: {:?}", original.id, e);
                original.clone()
            }
        }
    };

    let language_options = languages::LANGUAGES
        .iter()
        .map(|l| SelectOption {
            value: l.code.to_string(),
            label: format!("{} ({})", l.native_name, l.name),
            selected: l.code == language,
        })
        .collect();

    let template = PlantTemplate {
        title: plant.common_name.clone(),
        hero_image: state.images.get_image(original.id, 0).to_string(),
        extra_images: (1..=2).map(|i| state.images.get_image(original.id, i).to_string()).collect(),
        show_precaution: original.safety.precaution_warning().is_some(),
        language: language.to_string(),
        language_options,
        plant,
    };
    render(&template).into_response()
}

// ============================================================================
// Image Gallery Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/images.html")]
pub struct ImagesTemplate {
    pub title: String,
    pub images: Vec<GalleryImage>,
}

pub async fn images_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = ImagesTemplate {
        title: "Image Gallery".to_string(),
        images: state.images.gallery().to_vec(),
    };
    render(&template)
}
