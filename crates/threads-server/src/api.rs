//! HTTP API for Threads of Tradition.

use crate::assets::Assets;
use crate::error::{Error, Result};
use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, Request, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use http_body_util::LengthLimitError;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use threads_core::{
    LessonItem, NewLesson, NewNews, NewsItem, ProfileInfo, ProfileUpdate, ProgressState,
    ProgressStore,
};

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 1_000_000;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProgressStore>,
    pub assets: Assets,
}

/// Build the API router. Non-API paths fall through to the static assets.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/state", get(get_state))
        // Catalog
        .route("/api/lessons", get(list_lessons).post(create_lesson))
        .route("/api/news", get(list_news).post(create_news))
        // Progress
        .route("/api/lessons/{id}/toggle", post(toggle_lesson))
        .route("/api/news/{id}/toggle", post(toggle_news))
        .route("/api/stories/{id}/toggle", post(toggle_news))
        .route("/api/reset", post(reset))
        // Profile
        .route("/api/profile", get(get_profile).put(save_profile))
        .method_not_allowed_fallback(route_not_found)
        .fallback(fallback)
        .with_state(state)
}

/// Run a store operation on the blocking pool. Store calls do file I/O and
/// writers wait on the store's lock, neither of which belongs on an async worker.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&ProgressStore) -> threads_core::Result<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    Ok(tokio::task::spawn_blocking(move || op(&store)).await??)
}

// --- Health ---

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

// --- State ---

async fn get_state(State(state): State<AppState>) -> Result<Json<ProgressState>> {
    Ok(Json(with_store(&state, |store| Ok(store.state())).await?))
}

async fn reset(State(state): State<AppState>) -> Result<Json<ProgressState>> {
    Ok(Json(with_store(&state, |store| store.reset()).await?))
}

// --- Lessons ---

async fn list_lessons(State(state): State<AppState>) -> Result<Json<Vec<LessonItem>>> {
    Ok(Json(with_store(&state, |store| Ok(store.lessons())).await?))
}

async fn create_lesson(
    State(state): State<AppState>,
    body: Body,
) -> Result<(StatusCode, Json<LessonItem>)> {
    let input = NewLesson::from_object(&read_object(body).await?);
    let lesson = with_store(&state, move |store| store.add_lesson(&input)).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

async fn toggle_lesson(
    State(state): State<AppState>,
    uri: Uri,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ProgressState>> {
    let id = path_id(&uri, id)?;
    Ok(Json(with_store(&state, move |store| store.toggle_lesson(&id)).await?))
}

// --- News ---

async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsItem>>> {
    Ok(Json(with_store(&state, |store| Ok(store.news())).await?))
}

async fn create_news(
    State(state): State<AppState>,
    body: Body,
) -> Result<(StatusCode, Json<NewsItem>)> {
    let input = NewNews::from_object(&read_object(body).await?);
    let item = with_store(&state, move |store| store.add_news(&input)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn toggle_news(
    State(state): State<AppState>,
    uri: Uri,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ProgressState>> {
    let id = path_id(&uri, id)?;
    Ok(Json(with_store(&state, move |store| store.toggle_news(&id)).await?))
}

// --- Profile ---

async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileInfo>> {
    Ok(Json(with_store(&state, |store| Ok(store.profile())).await?))
}

async fn save_profile(State(state): State<AppState>, body: Body) -> Result<Json<ProfileInfo>> {
    let update = ProfileUpdate::from_object(&read_object(body).await?);
    Ok(Json(with_store(&state, move |store| store.save_profile(&update)).await?))
}

// --- Fallbacks ---

async fn route_not_found() -> Error {
    Error::RouteNotFound
}

async fn fallback(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return Error::RouteNotFound.into_response();
    }
    state.assets.serve(req).await
}

/// Read a request body as a JSON object. An empty body is `{}`.
async fn read_object(body: Body) -> Result<Map<String, Value>> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            if exceeds_limit(&e) {
                Error::PayloadTooLarge
            } else {
                tracing::debug!(error = %e, "request body unreadable");
                Error::InvalidBody("Failed to read request body".to_string())
            }
        })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(Error::InvalidBody(
            "Request body must be a JSON object".to_string(),
        )),
        Err(_) => Err(Error::InvalidBody("Invalid JSON body".to_string())),
    }
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

/// The `{id}` segment of a toggle route, matched against `[a-z0-9-]+` as it
/// appears on the wire. Percent-encoded or undecodable ids are not routes.
fn path_id(
    uri: &Uri,
    extracted: std::result::Result<Path<String>, PathRejection>,
) -> Result<String> {
    let Path(id) = extracted.map_err(|_| Error::RouteNotFound)?;
    checked_id(&id)?;
    if uri.path().split('/').nth(3) != Some(id.as_str()) {
        return Err(Error::RouteNotFound);
    }
    Ok(id)
}

/// Path ids are lowercase ASCII letters, digits and dashes.
fn checked_id(id: &str) -> Result<&str> {
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if valid {
        Ok(id)
    } else {
        Err(Error::RouteNotFound)
    }
}
