//! End-to-end resolution tests against the in-process router.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use redirector::http::{HttpServer, DEFAULT_GREETING};
use redirector::lifecycle::{build_application, Application};

const JSON: &str = r#"{"/j": "https://json.example/j", "/s": "https://json.example/s"}"#;
const YAML: &str = "- path: /y\n  url: https://yaml.example/y\n";

async fn oneshot(app: &Application, env: &common::TestEnv, uri: &str) -> axum::response::Response {
    let router = HttpServer::new(&env.config, Arc::clone(&app.chain)).into_router();
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn json_mapping_redirects_with_302() {
    let env = common::test_env(JSON, YAML);
    let app = build_application(&env.config).unwrap();

    let response = oneshot(&app, &env, "/j").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "https://json.example/j");
    app.store.close().await.unwrap();
}

#[tokio::test]
async fn yaml_mapping_redirects_with_302() {
    let env = common::test_env(JSON, YAML);
    let app = build_application(&env.config).unwrap();

    let response = oneshot(&app, &env, "/y").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "https://yaml.example/y");
    app.store.close().await.unwrap();
}

#[tokio::test]
async fn store_record_beats_static_sources() {
    let env = common::test_env(JSON, YAML);
    let app = build_application(&env.config).unwrap();

    // Same path exists in the JSON mapping with a different destination.
    app.store.put("/s", "https://store.example/s").unwrap();

    let response = oneshot(&app, &env, "/s").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "https://store.example/s");
    app.store.close().await.unwrap();
}

#[tokio::test]
async fn unknown_path_falls_through_to_the_greeting() {
    let env = common::test_env(JSON, YAML);
    let app = build_application(&env.config).unwrap();

    let response = oneshot(&app, &env, "/unknown").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, DEFAULT_GREETING.as_bytes());
    app.store.close().await.unwrap();
}

#[tokio::test]
async fn records_written_at_runtime_resolve_immediately() {
    let env = common::test_env(JSON, YAML);
    let app = build_application(&env.config).unwrap();

    assert_eq!(oneshot(&app, &env, "/new").await.status(), StatusCode::OK);

    app.store.put("/new", "https://store.example/new").unwrap();

    let response = oneshot(&app, &env, "/new").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://store.example/new"
    );
    app.store.close().await.unwrap();
}
