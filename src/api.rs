//! HTTP surface for the flashcard server.
//!
//! This module exposes a compact Axum router with a handful of read-only endpoints:
//!
//! - `GET /api/flashcards` – List cards, optionally narrowed by `category`, `difficulty`
//!   (exact matches, `all` disables) and `search` (case-insensitive substring over question,
//!   answer and tags). Returns `{ "total": number, "flashcards": [...] }`.
//! - `GET /api/flashcards/:id` – Fetch one card, or `404 { "error": "Flashcard not found" }`.
//! - `GET /api/flashcards/random/:count` – Up to `count` distinct cards in random order
//!   (defaults to 10).
//! - `GET /api/metadata` – The document metadata, verbatim.
//! - `GET /api/categories` – The `categories` list from the metadata, or `[]`.
//!
//! Every route allows cross-origin requests. A panic while serving a request is turned into
//! `500 { "error": "Something went wrong!" }` with the detail logged server-side.

use crate::deck::{Flashcard, Metadata};
use crate::query::{FlashcardFilter, FlashcardList, FlashcardQueries, parse_int_prefix, sample_len};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::path::Path as FsPath;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the HTTP router exposing the flashcard API.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: FlashcardQueries + 'static,
{
    with_middleware(api_routes(service))
}

/// Build the API router and serve the front-end bundle in `static_dir` for every other path.
///
/// Paths that match a file in the bundle receive that file; anything else receives the
/// bundle's `index.html` so client-side routing can take over.
pub fn create_router_with_frontend<S>(service: Arc<S>, static_dir: &FsPath) -> Router
where
    S: FlashcardQueries + 'static,
{
    let index = ServeFile::new(static_dir.join("index.html"));
    let assets = ServeDir::new(static_dir).fallback(index);
    with_middleware(api_routes(service).fallback_service(assets))
}

fn api_routes<S>(service: Arc<S>) -> Router
where
    S: FlashcardQueries + 'static,
{
    Router::new()
        .route("/api/flashcards", get(list_flashcards::<S>))
        .route("/api/flashcards/:id", get(get_flashcard::<S>))
        .route("/api/flashcards/random/:count", get(random_flashcards::<S>))
        .route("/api/metadata", get(get_metadata::<S>))
        .route("/api/categories", get(list_categories::<S>))
        .with_state(service)
}

fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
                .allow_headers(cors::Any),
        )
}

/// List cards matching the optional query-string filter.
///
/// The query string is taken as raw pairs so repeated keys resolve to their first value
/// instead of failing extraction.
async fn list_flashcards<S>(
    State(service): State<Arc<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<FlashcardList>, ApiError>
where
    S: FlashcardQueries,
{
    let Query(pairs) = query.map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
    let filter: FlashcardFilter = pairs.into_iter().collect();
    Ok(Json(service.list(&filter)))
}

/// Fetch a single card by id.
///
/// The id segment is parsed leniently; a segment that cannot be decoded or has no leading
/// digits simply matches nothing.
async fn get_flashcard<S>(
    State(service): State<Arc<S>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Flashcard>, ApiError>
where
    S: FlashcardQueries,
{
    let raw_id = path_segment(raw_id);
    parse_int_prefix(&raw_id)
        .and_then(|id| service.get(id))
        .map(Json)
        .ok_or(ApiError::FlashcardNotFound)
}

/// Draw a random sample of cards without replacement.
///
/// An undecodable count behaves like any other non-numeric count and uses the default size.
async fn random_flashcards<S>(
    State(service): State<Arc<S>>,
    raw_count: Result<Path<String>, PathRejection>,
) -> Json<Vec<Flashcard>>
where
    S: FlashcardQueries,
{
    let raw_count = path_segment(raw_count);
    let count = sample_len(&raw_count, service.flashcard_count());
    Json(service.random_sample(count))
}

/// The decoded path segment, or an empty string when it was not valid UTF-8.
fn path_segment(segment: Result<Path<String>, PathRejection>) -> String {
    match segment {
        Ok(Path(raw)) => raw,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Undecodable path segment");
            String::new()
        }
    }
}

async fn get_metadata<S>(State(service): State<Arc<S>>) -> Json<Metadata>
where
    S: FlashcardQueries,
{
    Json(service.metadata().clone())
}

async fn list_categories<S>(State(service): State<Arc<S>>) -> Json<Value>
where
    S: FlashcardQueries,
{
    Json(service.categories())
}

/// Failures surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No card carries the requested id.
    #[error("Flashcard not found")]
    FlashcardNotFound,
    /// Request processing failed unexpectedly; the detail stays server-side.
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::FlashcardNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::FlashcardNotFound => "Flashcard not found",
            Self::Internal(_) => "Something went wrong!",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(detail = %detail, "Unhandled error while serving request");
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "handler panicked with a non-string payload".to_string()
    };
    ApiError::Internal(detail).into_response()
}
