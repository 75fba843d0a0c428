//! 세션 녹화 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 세션 녹화 요약 (목록 API 항목)
///
/// 알려지지 않은 필드는 `extra`에 그대로 보존한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// 녹화 ID
    pub id: String,
    /// 사용자가 이미 시청했는지
    #[serde(default)]
    pub viewed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_id: Option<String>,
    /// 녹화 길이 (초)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recording {
    /// ID만 가진 녹화 (테스트/프리뷰용)
    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            viewed: false,
            distinct_id: None,
            recording_duration: None,
            start_time: None,
            end_time: None,
            extra: Map::new(),
        }
    }
}

/// 목록 API 응답 한 페이지
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingsPage {
    #[serde(default)]
    pub results: Vec<Recording>,
    #[serde(default)]
    pub has_next: bool,
}

/// 녹화를 열게 된 경로 (분석 전용 태그)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchedSource {
    /// 링크로 직접 진입
    Direct,
    /// 녹화 목록에서 클릭
    RecordingsList,
    /// 사람 상세 페이지
    PersonPage,
    /// 홈 대시보드
    HomePage,
    #[serde(other)]
    Unknown,
}

impl WatchedSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchedSource::Direct => "direct",
            WatchedSource::RecordingsList => "recordings_list",
            WatchedSource::PersonPage => "person_page",
            WatchedSource::HomePage => "home_page",
            WatchedSource::Unknown => "unknown",
        }
    }

    /// 문자열 태그 해석 (모르는 값은 `Unknown`)
    pub fn parse(tag: &str) -> Self {
        match tag {
            "direct" => WatchedSource::Direct,
            "recordings_list" => WatchedSource::RecordingsList,
            "person_page" => WatchedSource::PersonPage,
            "home_page" => WatchedSource::HomePage,
            _ => WatchedSource::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_keeps_unknown_fields() {
        let page: RecordingsPage = serde_json::from_value(json!({
            "results": [
                {"id": "r1", "viewed": true, "recording_duration": 93.5, "console_error_count": 2},
                {"id": "r2", "start_time": "2026-10-01T09:00:00Z"}
            ],
            "has_next": true
        }))
        .unwrap();

        assert!(page.has_next);
        assert_eq!(page.results.len(), 2);
        assert!(page.results[0].viewed);
        assert_eq!(page.results[0].extra.get("console_error_count"), Some(&json!(2)));
        assert!(!page.results[1].viewed);
        assert!(page.results[1].start_time.is_some());
    }

    #[test]
    fn missing_fields_default() {
        let page: RecordingsPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.results.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn watched_source_tags() {
        for source in [
            WatchedSource::Direct,
            WatchedSource::RecordingsList,
            WatchedSource::PersonPage,
            WatchedSource::HomePage,
        ] {
            assert_eq!(WatchedSource::parse(source.as_str()), source);
        }
        assert_eq!(WatchedSource::parse("slack"), WatchedSource::Unknown);
        let parsed: WatchedSource = serde_json::from_value(json!("email")).unwrap();
        assert_eq!(parsed, WatchedSource::Unknown);
    }
}
