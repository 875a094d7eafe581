use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use ce_core::{Error, NewArticle, UpdateArticle};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

/// Map a pipeline error onto the API contract: conflicts are 400,
/// unknown ids 404, everything else 500.
fn error_response(e: Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e {
        Error::Duplicate(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "success": false, "error": e.to_string() })))
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_articles().await {
        Ok(articles) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": articles.len(),
                "data": articles,
            })),
        ),
        Err(e) => error_response(e),
    }
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_article(&id).await {
        Ok(article) => (StatusCode::OK, Json(json!({ "success": true, "data": article }))),
        Err(e) => error_response(e),
    }
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewArticle>,
) -> impl IntoResponse {
    match state.store.create_article(new).await {
        Ok(article) => (StatusCode::CREATED, Json(json!({ "success": true, "data": article }))),
        Err(e) => error_response(e),
    }
}

pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<UpdateArticle>,
) -> impl IntoResponse {
    match state.store.update_article(&id, update).await {
        Ok(article) => (StatusCode::OK, Json(json!({ "success": true, "data": article }))),
        Err(e) => error_response(e),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}
