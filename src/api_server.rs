// Axum API Server Module
//
// Purpose: JSON API + HTML pages over the read-only plant catalog, with
// on-demand translation of plant records through the external service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::images::ImageCatalog;
use crate::languages::{self, SOURCE_LANGUAGE};
use crate::model::PlantRecord;
use crate::query_engine::query;
use crate::translate::{MyMemoryClient, Translator};
use crate::web::handlers::pages;
use crate::web::GalleryParams;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub images: Arc<ImageCatalog>,
    pub translator: Arc<Translator>,
    /// Translated records keyed `translate:{id}:{lang}`
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    /// Load the bundled data and build the MyMemory-backed translator.
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading plant dataset...");
        let catalog = Catalog::load(config.plants_path())?;

        tracing::info!("Loading image table...");
        let images = ImageCatalog::load(config.images_path())?;

        languages::validate_unique(languages::LANGUAGES)?;

        tracing::info!("Initializing translation client ({})...", config.translate_url);
        let client = MyMemoryClient::with_timeout(config.translate_timeout)?.with_base_url(config.translate_url.clone());
        let translator = Translator::new(Arc::new(client));

        Ok(Self::from_parts(catalog, images, translator, config))
    }

    /// Assemble state from already-built parts (tests inject a stub backend here).
    pub fn from_parts(catalog: Catalog, images: ImageCatalog, translator: Translator, config: &ServerConfig) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            catalog: Arc::new(catalog),
            images: Arc::new(images),
            translator: Arc::new(translator),
            cache,
        }
    }

    /// Plant `id` translated into `lang`, as JSON.
    ///
    /// Fully successful translations are cached. A run with leaf failures is
    /// returned (failed leaves hold the English text) but not cached, so the
    /// next request tries again.
    pub async fn translated_plant(&self, id: u32, lang: &str) -> Result<serde_json::Value, AppError> {
        let plant = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?;

        let language = languages::find(lang)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported language: {}", lang)))?;

        if language.code == SOURCE_LANGUAGE {
            return serde_json::to_value(plant).map_err(|e| AppError::Internal(e.to_string()));
        }

        let cache_key = format!("translate:{}:{}", id, language.code);
        if let Some(cached) = self.cache.get(&cache_key).await {
            tracing::debug!("Cache hit for plant {} in {}", id, language.code);
            return Ok(cached);
        }

        tracing::debug!("Translating plant {} into {}", id, language.code);
        let translated = self
            .translator
            .translate_record(plant, language.code)
            .await
            .map_err(|e| AppError::Internal(format!("Translation produced an invalid record: {}", e)))?;

        let value = serde_json::to_value(&translated.value).map_err(|e| AppError::Internal(e.to_string()))?;

        if translated.report.failed == 0 {
            self.cache.insert(cache_key, value.clone()).await;
        }

        Ok(value)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Plant endpoints (JSON API)
        .route("/api/plants", get(search_plants))
        .route("/api/plants/types", get(get_plant_types))
        .route("/api/plants/:id", get(get_plant))
        .route("/api/plants/:id/images/:index", get(get_plant_image))
        .route("/api/plants/:id/translate", get(translate_plant))
        .route("/api/languages", get(get_languages))

        // HTML pages
        .route("/", get(pages::home_page))
        .route("/gallery", get(pages::gallery_page))
        .route("/plant/:id", get(pages::plant_page))
        .route("/images", get(pages::images_page))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "plants": state.catalog.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn search_plants(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let start = std::time::Instant::now();

    let results = query(state.catalog.plants(), &params.query());
    let page = params.pager().page(&results);

    let elapsed = start.elapsed();
    tracing::debug!(
        "Plant search {:?} returned {}/{} results in {:?}",
        params.search_text(),
        page.items.len(),
        page.total,
        elapsed
    );

    Ok(Json(serde_json::json!({
        "rows": page.items.len(),
        "total": page.total,
        "visible": page.visible_count,
        "has_more": page.has_more,
        "share_url": params.href(),
        "data": page.items,
        "query_time_us": elapsed.as_micros(),
    })))
}

async fn get_plant_types(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "types": state.catalog.plant_types(),
    }))
}

async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlantRecord>, AppError> {
    let plant = parse_id(&id)
        .and_then(|id| state.catalog.get(id))
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?;

    Ok(Json(plant.clone()))
}

async fn get_plant_image(
    State(state): State<AppState>,
    Path((id, index)): Path<(u32, usize)>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": id,
        "index": index,
        "url": state.images.get_image(id, index),
    }))
}

#[derive(Debug, Deserialize)]
struct TranslateQuery {
    lang: Option<String>,
}

async fn translate_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<TranslateQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id).ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?;
    let lang = params.lang.as_deref().unwrap_or(SOURCE_LANGUAGE);

    let plant = state.translated_plant(id, lang).await?;

    Ok(Json(serde_json::json!({
        "language": lang.trim().to_lowercase(),
        "plant": plant,
    })))
}

async fn get_languages() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "languages": languages::LANGUAGES,
    }))
}

pub(crate) fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
