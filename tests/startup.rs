//! Startup orchestration tests: seeding, fail-fast errors, shutdown order.

mod common;

use std::time::Duration;

use redirector::lifecycle::{build_application, StartupError};
use redirector::storage::RedirectStore;

const JSON: &str = r#"{"/j": "https://json.example/j"}"#;
const YAML: &str = "- path: /y\n  url: https://yaml.example/y\n";

#[tokio::test]
async fn seed_record_is_written_at_startup() {
    let env = common::test_env(JSON, YAML);
    let app = build_application(&env.config).unwrap();

    assert_eq!(
        app.store.get("/b").unwrap().as_deref(),
        Some("https://github.com/boltdb/bolt")
    );
    app.store.close().await.unwrap();
}

#[tokio::test]
async fn seed_overwrites_prior_store_contents() {
    let env = common::test_env(JSON, YAML);

    // A previous process left a different destination at the seed path.
    {
        let store =
            RedirectStore::open(&env.config.storage.db_path, Duration::from_secs(3600)).unwrap();
        store.put("/b", "https://stale.example/b").unwrap();
        store.close().await.unwrap();
    }

    let app = build_application(&env.config).unwrap();
    assert_eq!(
        app.store.get("/b").unwrap().as_deref(),
        Some("https://github.com/boltdb/bolt")
    );
    app.store.close().await.unwrap();
}

#[tokio::test]
async fn missing_source_file_fails_startup() {
    let mut env = common::test_env(JSON, YAML);
    env.config.sources.yaml_path = "/nonexistent/path_urls.yaml".to_string();

    let err = build_application(&env.config).unwrap_err();
    assert!(matches!(err, StartupError::SourceOpen { .. }));
}

#[tokio::test]
async fn malformed_source_fails_startup() {
    let env = common::test_env(r#"{"/j": "#, YAML);

    let err = build_application(&env.config).unwrap_err();
    assert!(matches!(err, StartupError::SourceDecode { .. }));
}

#[tokio::test]
async fn close_joins_the_stats_reporter() {
    let mut env = common::test_env(JSON, YAML);
    env.config.storage.stats_interval_secs = 1;

    let app = build_application(&env.config).unwrap();

    // close() resolves only once the reporter acknowledged cancellation.
    tokio::time::timeout(Duration::from_secs(5), app.store.close())
        .await
        .expect("close did not complete in time")
        .unwrap();

    // The reporter is gone; the store now refuses further work.
    assert!(app.store.get("/b").is_err());
}
