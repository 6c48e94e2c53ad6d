mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use recipe_frontend::config::RecipeConfig;
use recipe_frontend::services::providers::{CompletionParams, MockCompletionProvider};
use recipe_frontend::services::{Database, RecipeAssistant};
use recipe_frontend::startup::build_router;
use recipe_frontend::AppState;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_reports_ok_with_provider_name() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "recipe-frontend");
    assert_eq!(body["ai_provider"], "mock");
}

#[tokio::test]
async fn metrics_endpoint_exposes_http_counters() {
    let app = TestApp::spawn().await;

    app.get("/").await;
    let response = app.get("/metrics").await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("http_requests_total"));
}

#[tokio::test]
async fn static_stylesheet_is_served() {
    let app = TestApp::spawn().await;

    let response = app.get("/static/app.css").await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn router_serves_pages_without_a_listener() {
    let config = RecipeConfig::for_tests();
    let db = Database::new(&config.database.url, 1, 1)
        .await
        .expect("Failed to open database");
    db.run_migrations().await.expect("Failed to migrate");
    db.seed_if_empty().await.expect("Failed to seed");

    let assistant = RecipeAssistant::new(
        Arc::new(MockCompletionProvider::new()),
        CompletionParams::default(),
    );
    let router = build_router(AppState::new(db, assistant), &config.static_dir);

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}
