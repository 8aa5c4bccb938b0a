//! HTTP presentation layer.
//!
//! Serves the immutable catalog as a JSON API, plus the SEO surfaces
//! (`sitemap.xml`, `robots.txt`) and social preview cards. The catalog
//! is built once before the server starts and shared read-only behind
//! an `Arc` — handlers never mutate it, so no locking is needed.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Health check (returns version) |
//! | `GET` | `/api/catalog` | Full catalog: categories, subcategories, resources |
//! | `GET` | `/api/categories/{slug}` | One category by slug |
//! | `GET` | `/api/resources/{category}/{slug}` | One resource by category + slug |
//! | `GET` | `/api/search?q=...` | Substring search across resources |
//! | `GET` | `/go/{category}/{slug}` | Redirect to a resource's primary link |
//! | `GET` | `/go/{category}/{slug}/{index}` | Redirect to the nth link |
//! | `GET` | `/sitemap.xml` | Sitemap enumerating every page |
//! | `GET` | `/robots.txt` | Crawler directives |
//! | `GET` | `/og/home.svg`, `/og/search.svg` | Site-wide preview cards |
//! | `GET` | `/og/category/{slug}.svg` | Category preview card |
//! | `GET` | `/og/resource/{category}/{slug}.svg` | Resource preview card |
//!
//! # Error contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "no category with slug: maps" } }
//! ```

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::models::Catalog;
use crate::preview::{render_card, PreviewCache, PreviewCard};
use crate::query;
use crate::sitemap;

/// Shared application state, cloned per handler via Axum's `State`.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
    previews: Arc<PreviewCache>,
}

/// Start the HTTP server over an already-built catalog.
///
/// Binds to `[server].bind` and runs until the process is terminated.
/// Building the catalog before calling this is the hard precondition
/// that makes every handler lock-free.
pub async fn run_server(config: &Config, catalog: Catalog) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        previews: Arc::new(PreviewCache::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/catalog", get(handle_catalog))
        .route("/api/categories/{slug}", get(handle_category))
        .route("/api/resources/{category}/{slug}", get(handle_resource))
        .route("/api/search", get(handle_search))
        .route("/go/{category}/{slug}", get(handle_outbound))
        .route("/go/{category}/{slug}/{index}", get(handle_outbound_indexed))
        .route("/sitemap.xml", get(handle_sitemap))
        .route("/robots.txt", get(handle_robots))
        .route("/og/home.svg", get(handle_preview_home))
        .route("/og/search.svg", get(handle_preview_search))
        .route("/og/category/{slug}", get(handle_preview_category))
        .route("/og/resource/{category}/{slug}", get(handle_preview_resource))
        .layer(cors)
        .with_state(state);

    println!("lootbook listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/catalog ============

async fn handle_catalog(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!(&*state.catalog))
}

// ============ GET /api/categories/{slug} ============

async fn handle_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = query::category_by_slug(&state.catalog, &slug)
        .ok_or_else(|| not_found(format!("no category with slug: {slug}")))?;
    Ok(Json(serde_json::json!(category)))
}

// ============ GET /api/resources/{category}/{slug} ============

async fn handle_resource(
    State(state): State<AppState>,
    Path((category, slug)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let resource = query::resource_by_slug(&state.catalog, &category, &slug)
        .ok_or_else(|| not_found(format!("no resource with slug: {category}/{slug}")))?;
    Ok(Json(serde_json::json!(resource)))
}

// ============ GET /api/search ============

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let results = query::search(&state.catalog, &params.q);
    Json(serde_json::json!({
        "query": params.q,
        "count": results.len(),
        "results": results,
    }))
}

// ============ GET /go/{category}/{slug}[/{index}] ============

/// Redirect only to links stored in the catalog. Looking the target up
/// by slug keeps this from acting as an open redirect.
fn redirect_to_link(
    state: &AppState,
    category: &str,
    slug: &str,
    index: usize,
) -> Result<Redirect, AppError> {
    let url = query::outbound_url(&state.catalog, category, slug, index)
        .ok_or_else(|| not_found(format!("no link {index} for resource: {category}/{slug}")))?;
    Ok(Redirect::temporary(url))
}

async fn handle_outbound(
    State(state): State<AppState>,
    Path((category, slug)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    redirect_to_link(&state, &category, &slug, 0)
}

async fn handle_outbound_indexed(
    State(state): State<AppState>,
    Path((category, slug, index)): Path<(String, String, String)>,
) -> Result<Redirect, AppError> {
    let index: usize = index
        .parse()
        .map_err(|_| not_found(format!("invalid link index: {index}")))?;
    redirect_to_link(&state, &category, &slug, index)
}

// ============ GET /sitemap.xml, GET /robots.txt ============

async fn handle_sitemap(State(state): State<AppState>) -> Result<Response, AppError> {
    let xml = sitemap::render_sitemap(&state.catalog, &state.config.site.base_url)
        .map_err(|e| internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

async fn handle_robots(State(state): State<AppState>) -> Response {
    let body = sitemap::render_robots(&state.config.site.base_url);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

// ============ GET /og/... preview cards ============

/// Serve a card from the cache, rendering and caching it on first
/// request. Cards depend only on the immutable catalog and config, so
/// cached bytes never go stale within a process.
fn serve_card(state: &AppState, key: &str, card: &PreviewCard) -> Response {
    let bytes = match state.previews.get(key) {
        Some(bytes) => bytes,
        None => {
            let bytes = render_card(card, &state.config.site, &state.config.preview);
            state.previews.insert(key.to_string(), bytes.clone());
            bytes
        }
    };

    ([(header::CONTENT_TYPE, "image/svg+xml")], bytes).into_response()
}

async fn handle_preview_home(State(state): State<AppState>) -> Response {
    serve_card(
        &state,
        "og/home",
        &PreviewCard::Home {
            total_resources: state.catalog.total_resources,
            category_count: state.catalog.categories.len(),
        },
    )
}

async fn handle_preview_search(State(state): State<AppState>) -> Response {
    serve_card(
        &state,
        "og/search",
        &PreviewCard::Search {
            total_resources: state.catalog.total_resources,
        },
    )
}

async fn handle_preview_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let slug = slug.strip_suffix(".svg").unwrap_or(&slug).to_string();
    let category = query::category_by_slug(&state.catalog, &slug)
        .ok_or_else(|| not_found(format!("no category with slug: {slug}")))?;

    let description = if category.description.is_empty() {
        format!(
            "Browse {} {} resources.",
            category.resource_count(),
            category.name
        )
    } else {
        category.description.clone()
    };

    Ok(serve_card(
        &state,
        &format!("og/category/{slug}"),
        &PreviewCard::Category {
            name: &category.name,
            description: &description,
            resource_count: category.resource_count(),
        },
    ))
}

async fn handle_preview_resource(
    State(state): State<AppState>,
    Path((category, slug)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let slug = slug.strip_suffix(".svg").unwrap_or(&slug).to_string();
    let resource = query::resource_by_slug(&state.catalog, &category, &slug)
        .ok_or_else(|| not_found(format!("no resource with slug: {category}/{slug}")))?;

    Ok(serve_card(
        &state,
        &format!("og/resource/{category}/{slug}"),
        &PreviewCard::Resource {
            name: &resource.name,
            description: &resource.description,
            category_name: &resource.category_name,
        },
    ))
}
