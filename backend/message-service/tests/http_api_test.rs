//! Integration Tests: HTTP API surface
//!
//! Drives the actix handlers end to end over an in-memory SQLite database.
//!
//! Coverage:
//! - POST /api/v1/messages returns 201 with the canonical dual-shape body
//! - Empty/whitespace text is rejected with 400
//! - GET /api/v1/messages returns a newest-first array with both sentiment
//!   shapes on every element

use actix_web::{test, web, App};
use message_service::config::SentimentConfig;
use message_service::handlers;
use message_service::services::{MessageService, SentimentClassifier};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

async fn setup_app_data() -> web::Data<Arc<MessageService>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let classifier = Arc::new(SentimentClassifier::new(SentimentConfig::default()));
    web::Data::new(Arc::new(MessageService::new(pool, classifier)))
}

macro_rules! test_app {
    ($data:expr) => {
        test::init_service(
            App::new().app_data($data.clone()).service(
                web::scope("/api/v1").service(
                    web::resource("/messages")
                        .route(web::post().to(handlers::create_message))
                        .route(web::get().to(handlers::list_messages)),
                ),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn create_returns_canonical_message_with_both_sentiment_shapes() {
    let data = setup_app_data().await;
    let app = test_app!(data);

    let req = test::TestRequest::post()
        .uri("/api/v1/messages")
        .set_json(serde_json::json!({"alias": "", "text": "  harika  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["alias"], "anon");
    assert_eq!(body["text"], "harika");
    assert_eq!(body["sentiment"]["label"], "positive");
    assert_eq!(body["sentimentLabel"], "positive");
    assert_eq!(body["sentiment"]["score"], body["sentimentScore"]);
    assert!(body["createdAt"].is_string());
    assert!(body["id"].is_i64() || body["id"].is_u64());
}

#[actix_web::test]
async fn create_rejects_whitespace_text_with_bad_request() {
    let data = setup_app_data().await;
    let app = test_app!(data);

    let req = test::TestRequest::post()
        .uri("/api/v1/messages")
        .set_json(serde_json::json!({"alias": "oguz", "text": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get()
        .uri("/api/v1/messages")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(|a| a.len()), Some(0));
}

#[actix_web::test]
async fn list_returns_newest_first_with_dual_shape_on_every_element() {
    let data = setup_app_data().await;
    let app = test_app!(data);

    for text in ["bir", "iki", "üç"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/messages")
            .set_json(serde_json::json!({"alias": "oguz", "text": text}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/messages?alias=oguz&limit=50")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let items = body.as_array().expect("list body must be an array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["text"], "üç");
    assert_eq!(items[2]["text"], "bir");

    for item in items {
        assert_eq!(item["sentiment"]["label"], item["sentimentLabel"]);
        assert_eq!(item["sentiment"]["score"], item["sentimentScore"]);
    }
}
