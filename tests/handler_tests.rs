mod test_helpers;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use email_summarizer::api::{AppState, build_router};
use email_summarizer::clients::ChatCompletion;
use email_summarizer::core::config::{JsonFallback, ReplyLanguage, SummaryOptions};
use email_summarizer::core::models::NOT_PROCESSED_MESSAGE;
use http_body_util::BodyExt;
use test_helpers::{FULL_REPLY, StubClient};
use tower::ServiceExt;

fn options() -> SummaryOptions {
    SummaryOptions {
        language: ReplyLanguage::Spanish,
        fallback: JsonFallback::Error,
    }
}

fn app_with(stub: Option<Arc<StubClient>>) -> axum::Router {
    let client = stub.map(|s| s as Arc<dyn ChatCompletion>);
    build_router(AppState::new(client, options()))
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_renders_empty_form() {
    let app = app_with(None);
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Email Chain Summarizer"));
    assert!(!html.contains(NOT_PROCESSED_MESSAGE));
}

#[tokio::test]
async fn post_without_credential_shows_sentinel() {
    let response = app_with(None)
        .oneshot(post_form("email_chain=Hello+Bob"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(NOT_PROCESSED_MESSAGE));
}

#[tokio::test]
async fn post_empty_field_makes_no_call() {
    let stub = Arc::new(StubClient::replying(FULL_REPLY));
    let app = app_with(Some(stub.clone()));

    for body in ["email_chain=", ""] {
        let response = app.clone().oneshot(post_form(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(NOT_PROCESSED_MESSAGE));
    }
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn post_renders_summary_and_keeps_input() {
    let stub = Arc::new(StubClient::replying(FULL_REPLY));
    let response = app_with(Some(stub.clone()))
        .oneshot(post_form("email_chain=From%3A+Alice%0AMove+the+review%3F"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Summary generated successfully!"));
    assert!(html.contains("Budget review moved to Friday."));
    assert!(html.contains("<li>Alice</li>"));
    assert!(html.contains("<li>- Bob sends the deck</li>"));
    assert!(html.contains("Hi _____, Friday works for me."));
    assert!(html.contains("From: Alice\nMove the review?</textarea>"));

    let prompt = stub.last_prompt();
    assert!(prompt[1].ends_with("Cadena de correos:\nFrom: Alice\nMove the review?"));
}

#[tokio::test]
async fn remote_failure_still_returns_page() {
    let stub = Arc::new(StubClient::failing("quota exceeded"));
    let response = app_with(Some(stub))
        .oneshot(post_form("email_chain=thread"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<div class="error">Error: "#));
    assert!(html.contains("quota exceeded"));
}

#[tokio::test]
async fn identical_submissions_render_identically() {
    let stub = Arc::new(StubClient::replying(FULL_REPLY));
    let app = app_with(Some(stub.clone()));

    let first = body_text(app.clone().oneshot(post_form("email_chain=same")).await.unwrap()).await;
    let second = body_text(app.oneshot(post_form("email_chain=same")).await.unwrap()).await;

    assert_eq!(first, second);
    assert_eq!(stub.calls(), 2);
}

#[tokio::test]
async fn health_probe_reports_ok() {
    let response = app_with(None)
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
}
