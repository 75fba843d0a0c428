//! 애플리케이션 설정 구조체.
//!
//! 서버 URL, 인증 키, 요청 타임아웃, 녹화 목록 기본값 등
//! 런타임 설정을 정의한다. `ConfigManager`가 JSON 파일에서 로드한다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::filters::{DEFAULT_FROM_DATE, DEFAULT_MIN_DURATION_SECS};

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 서버 연결 설정
    pub server: ServerConfig,
    /// 녹화 목록 설정
    #[serde(default)]
    pub recordings: RecordingsConfig,
}

// ============================================================
// 서버 설정
// ============================================================

/// 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API 서버 기본 URL (예: "https://app.example.com")
    pub base_url: String,
    /// 개인 API 키 (없으면 인증 헤더 생략)
    #[serde(default)]
    pub api_key: Option<String>,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 일시적 실패 재시도 횟수
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

// ============================================================
// 녹화 목록 설정
// ============================================================

/// 녹화 목록 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingsConfig {
    /// 프로젝트(팀) ID
    #[serde(default = "default_project_id")]
    pub project_id: u64,
    /// 페이지 크기
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// 필터 변경 디바운스 (밀리초)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// 기본 조회 시작일 (예: "-21d")
    #[serde(default = "default_from_date")]
    pub default_from_date: String,
    /// 기본 최소 녹화 길이 (초)
    #[serde(default = "default_min_duration_secs")]
    pub default_min_duration_secs: u64,
}

impl Default for RecordingsConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            default_from_date: default_from_date(),
            default_min_duration_secs: default_min_duration_secs(),
        }
    }
}

impl RecordingsConfig {
    /// 디바운스 창을 Duration으로 반환
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:8000".to_string(),
                api_key: None,
                request_timeout_ms: default_request_timeout_ms(),
                max_retries: default_max_retries(),
            },
            recordings: RecordingsConfig::default(),
        }
    }

    /// 서버 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_request_timeout_ms() -> u64 {
    30_000
}
fn default_max_retries() -> u32 {
    3
}
fn default_project_id() -> u64 {
    1
}
fn default_page_size() -> u32 {
    50
}
fn default_debounce_ms() -> u64 {
    100
}
fn default_from_date() -> String {
    DEFAULT_FROM_DATE.to_string()
}
fn default_min_duration_secs() -> u64 {
    DEFAULT_MIN_DURATION_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"base_url": "https://eu.example.com"}}"#).unwrap();
        assert_eq!(config.server.base_url, "https://eu.example.com");
        assert_eq!(config.server.request_timeout_ms, 30_000);
        assert!(config.server.api_key.is_none());
        assert_eq!(config.recordings.page_size, 50);
        assert_eq!(config.recordings.default_from_date, "-21d");
    }

    #[test]
    fn duration_helpers() {
        let config = AppConfig::default_config();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.recordings.debounce(), Duration::from_millis(100));
    }
}
