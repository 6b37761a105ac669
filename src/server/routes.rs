use axum::{
    extract::{Query, State},
    Json,
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use crate::access::{Access, UpsertStatus};
use crate::entry::{EntryTable, check_inputs};
use crate::render;
use crate::server::{AppState, page};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct UpsertRequest {
    pub text: String,
    pub phoneme: String,
}

#[derive(Serialize)]
pub struct UpsertResponse {
    #[serde(flatten)]
    pub status: UpsertStatus,
    /// Plain-text status line
    pub message: String,
    /// Status line as an HTML fragment
    pub html: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub entries: EntryTable,
    pub error: Option<String>,
    /// Matches before truncation to the display limit
    pub total: usize,
    pub truncated: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn upsert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpsertRequest>,
) -> Result<(StatusCode, Json<UpsertResponse>), (StatusCode, Json<ErrorResponse>)> {
    if !check_inputs(&req.text, &req.phoneme) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: "text and phoneme must both be non-empty".to_string() }),
        ));
    }

    let status = {
        let store = state.store.lock().await;
        Access::new(&*store).upsert(&req.text, &req.phoneme)
    };

    let code = if status.is_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    Ok((
        code,
        Json(UpsertResponse {
            message: status.to_string(),
            html: render::status_html(&status),
            status,
        }),
    ))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let outcome = {
        let store = state.store.lock().await;
        Access::new(&*store).search(params.q.as_deref())
    };

    let total = outcome.entries.len();
    Json(SearchResponse {
        entries: outcome.entries.truncated(state.display_limit),
        error: outcome.error,
        total,
        truncated: total > state.display_limit,
    })
}

pub async fn search_table(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let outcome = {
        let store = state.store.lock().await;
        Access::new(&*store).search(params.q.as_deref())
    };

    Html(render::search_html(&outcome, state.display_limit))
}
