//! Shared helpers for integration tests.

use redirector::config::ServerConfig;
use tempfile::TempDir;

/// A config pointing at freshly written source files and an empty store,
/// all inside one temp dir kept alive by the guard.
pub struct TestEnv {
    pub config: ServerConfig,
    _dir: TempDir,
}

/// Write `json` and `yaml` as source files in a temp dir and return a config
/// wired to them.
pub fn test_env(json: &str, yaml: &str) -> TestEnv {
    let dir = tempfile::tempdir().expect("create temp dir");
    let json_path = dir.path().join("paths_to_urls.json");
    let yaml_path = dir.path().join("path_urls.yaml");
    std::fs::write(&json_path, json).expect("write JSON source");
    std::fs::write(&yaml_path, yaml).expect("write YAML source");

    let mut config = ServerConfig::default();
    config.sources.json_path = json_path.to_string_lossy().into_owned();
    config.sources.yaml_path = yaml_path.to_string_lossy().into_owned();
    config.storage.db_path = dir.path().join("store.redb").to_string_lossy().into_owned();

    TestEnv { config, _dir: dir }
}
