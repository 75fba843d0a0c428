//! 설정 및 DI 와이어링 통합 테스트.
//!
//! AppConfig → 어댑터 생성 → 테이블 마운트 → HTTP 조회까지 검증.

use std::sync::Arc;

use mockito::Matcher;
use replay_core::config::AppConfig;
use replay_core::config_manager::ConfigManager;
use replay_core::models::hash_params::HashParams;
use replay_core::models::location::{Location, TableLocation};
use replay_core::ports::router::UrlRouter;
use replay_network::http_client::HttpRecordingsClient;
use replay_recordings::flags::StaticFeatureFlags;
use replay_recordings::history::MemoryHistory;
use replay_recordings::reporter::TracingUsageReporter;
use replay_recordings::{FetchOutcome, RecordingsTable, TablePorts, TableProps, TableSettings};
use serde_json::json;

#[test]
fn config_defaults_are_valid() {
    let config = AppConfig::default_config();

    // 서버 설정
    assert!(!config.server.base_url.is_empty());
    assert!(config.server.request_timeout_ms > 0);
    assert!(config.server.api_key.is_none());

    // 녹화 목록 설정
    assert_eq!(config.recordings.page_size, 50);
    assert_eq!(config.recordings.debounce_ms, 100);
    assert_eq!(config.recordings.default_from_date, "-21d");
    assert_eq!(config.recordings.default_min_duration_secs, 60);
}

#[test]
fn table_settings_follow_config() {
    let mut config = AppConfig::default_config();
    config.recordings.page_size = 20;
    config.recordings.default_from_date = String::new();

    let settings = TableSettings::from(&config.recordings);
    assert_eq!(settings.page_size, 20);
    assert_eq!(settings.debounce.as_millis(), 100);
    assert_eq!(settings.default_from_date, None);
}

#[test]
fn config_serde_roundtrip() {
    let config = AppConfig::default_config();

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: AppConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized.server.base_url, config.server.base_url);
    assert_eq!(deserialized.recordings.page_size, config.recordings.page_size);
}

#[test]
fn config_manager_persists_updates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let manager = ConfigManager::with_path(path.clone()).unwrap();
    manager
        .update_with(|c| c.recordings.project_id = 99)
        .unwrap();

    let reopened = ConfigManager::with_path(path).unwrap();
    assert_eq!(reopened.get().recordings.project_id, 99);
}

#[tokio::test]
async fn http_client_feeds_table_from_url_state() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/projects/3/session_recordings")
        .match_header("authorization", "Bearer phx_key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("date_from".into(), "-7d".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
            Matcher::UrlEncoded("limit".into(), "50".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "results": [{"id": "abc", "viewed": false}, {"id": "def", "viewed": false}],
                "has_next": false
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut config = AppConfig::default_config();
    config.server.base_url = server.url();
    config.server.api_key = Some("phx_key".to_string());
    config.recordings.project_id = 3;
    config.recordings.debounce_ms = 5;

    let client = HttpRecordingsClient::new(
        &config.server.base_url,
        config.server.api_key.clone(),
        config.request_timeout(),
    )
    .unwrap();

    let mut hash = HashParams::new();
    hash.set_session_recording_id(Some("abc"));
    hash.insert_json(
        "recordingFilters",
        &json!({"events": [], "actions": [], "date_from": "-7d"}),
    );
    let history = Arc::new(MemoryHistory::new(Location::new("/recordings", hash)));

    let table = RecordingsTable::mount(
        TableProps {
            team_id: config.recordings.project_id,
            location: TableLocation::RecordingsPage,
            ..TableProps::default()
        },
        TableSettings::from(&config.recordings),
        TablePorts {
            api: Arc::new(client),
            router: history.clone(),
            reporter: Arc::new(TracingUsageReporter),
            flags: Arc::new(StaticFeatureFlags::new()),
        },
    );

    let outcome = table.wait_for_fetch().await;
    assert!(matches!(
        outcome,
        Some(FetchOutcome::Applied {
            results: 2,
            has_next: false
        })
    ));
    mock.assert_async().await;

    let snapshot = table.snapshot();
    assert_eq!(snapshot.selected_id.as_deref(), Some("abc"));
    assert_eq!(
        snapshot.selected_recording().map(|r| r.id.as_str()),
        Some("abc")
    );
    assert_eq!(history.location().hash.session_recording_id().as_deref(), Some("abc"));
}
