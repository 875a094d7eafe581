use axum::{routing::get, Router};
use ce_core::Result;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route(
            "/api/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/api/articles/:id",
            get(handlers::get_article).put(handlers::update_article),
        )
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("🚀 Server running on http://localhost:{}", port);
    info!("📚 API available at http://localhost:{}/api/articles", port);
    axum::serve(listener, app)
        .await
        .map_err(ce_core::Error::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use ce_core::{ArticleStore, NewArticle};
    use ce_storage::MemoryStorage;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app_with_store() -> (Router, Arc<MemoryStorage>) {
        let store = Arc::new(MemoryStorage::new());
        let app = create_app(AppState::new(store.clone()));
        (app, store)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_list() {
        let (app, _store) = app_with_store().await;
        let response = app
            .oneshot(Request::get("/api/articles").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["count"], json!(0));
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let (app, _store) = app_with_store().await;
        let response = app
            .oneshot(Request::get("/api/articles/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (app, _store) = app_with_store().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/articles",
                json!({
                    "title": "Test",
                    "original_content": "Body",
                    "source_url": "http://example.com/a"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["updated_content"], Value::Null);

        let response = app
            .oneshot(Request::get(format!("/api/articles/{}", id)).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["data"]["title"], json!("Test"));
    }

    #[tokio::test]
    async fn test_duplicate_post_is_400() {
        let (app, store) = app_with_store().await;
        store
            .create_article(NewArticle::scraped("T", "C", "http://example.com/a"))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/articles",
                json!({
                    "title": "Other",
                    "original_content": "Body",
                    "source_url": "http://example.com/a"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_put_replaces_record() {
        let (app, store) = app_with_store().await;
        let article = store
            .create_article(NewArticle::scraped("T", "C", "http://example.com/a"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/articles/{}", article.id),
                json!({
                    "title": "Updated",
                    "original_content": "New body",
                    "updated_content": "Enhanced body",
                    "source_url": "http://example.com/a",
                    "references": ["http://ref.example.com"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["title"], json!("Updated"));
        assert_eq!(body["data"]["references"], json!(["http://ref.example.com"]));

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/articles/missing",
                json!({
                    "title": "X",
                    "original_content": "X",
                    "updated_content": null,
                    "source_url": "http://example.com/x",
                    "references": []
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first() {
        let (app, store) = app_with_store().await;
        for i in 0..3 {
            store
                .create_article(NewArticle::scraped(
                    format!("Article {}", i),
                    "Content",
                    format!("http://example.com/{}", i),
                ))
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let response = app
            .oneshot(Request::get("/api/articles").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["count"], json!(3));
        assert_eq!(body["data"][0]["title"], json!("Article 2"));
        assert_eq!(body["data"][2]["title"], json!("Article 0"));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _store) = app_with_store().await;
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], json!("ok"));
        assert!(body["timestamp"].is_string());
    }
}
