//! URL 해시 파라미터 묶음.
//!
//! `#sessionRecordingId=...&recordingFilters={...}&source=...` 형태의
//! 보조 파라미터를 다룬다. 값은 디코딩된 원문 문자열 그대로, 들어온 순서대로
//! 보관한다. JSON 해석은 구조화된 키(`recordingFilters`)를 읽을 때만 한다.
//! 모르는 키는 순서와 중복까지 그대로 유지한다.

use serde_json::Value;
use url::form_urlencoded;

use crate::models::filters::{RecordingFilters, RecordingFiltersSnapshot};
use crate::models::recording::WatchedSource;

/// 선택된 녹화 ID 키
pub const SESSION_RECORDING_ID_KEY: &str = "sessionRecordingId";
/// 필터 스냅샷 키
pub const RECORDING_FILTERS_KEY: &str = "recordingFilters";
/// 선택 경로 태그 키
pub const SOURCE_KEY: &str = "source";

/// 해시 파라미터 묶음 (삽입 순서 유지)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashParams {
    entries: Vec<(String, String)>,
}

impl HashParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// 해시 프래그먼트 파싱 (앞의 `#`는 있어도 없어도 됨)
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let entries = form_urlencoded::parse(fragment.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { entries }
    }

    /// 해시 프래그먼트 문자열로 직렬화 (`#` 제외)
    pub fn to_fragment(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.entries)
            .finish()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 키의 첫 번째 값
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 키의 첫 번째 값을 JSON으로 해석 (해석 불가면 `None`)
    pub fn get_json(&self, key: &str) -> Option<Value> {
        self.get(key).and_then(|raw| serde_json::from_str(raw).ok())
    }

    /// 값 설정
    ///
    /// 이미 있는 키면 첫 위치에서 교체하고 같은 키의 나머지 항목은 지운다.
    /// 없으면 끝에 추가한다.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.entries[index].1 = value;
                let mut seen = 0;
                self.entries.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// JSON 값을 압축 문자열로 설정
    pub fn insert_json(&mut self, key: &str, value: &Value) {
        self.insert(key, value.to_string());
    }

    /// 키의 모든 항목 제거 (첫 번째 값 반환)
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let first = self.get(key).map(str::to_string);
        self.entries.retain(|(k, _)| k != key);
        first
    }

    /// 선택된 녹화 ID (원문 그대로)
    pub fn session_recording_id(&self) -> Option<String> {
        self.get(SESSION_RECORDING_ID_KEY)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    pub fn set_session_recording_id(&mut self, id: Option<&str>) {
        match id {
            Some(id) => self.insert(SESSION_RECORDING_ID_KEY, id),
            None => {
                self.remove(SESSION_RECORDING_ID_KEY);
            }
        }
    }

    /// 필터 스냅샷 (JSON 객체가 아니면 없는 것으로 취급)
    pub fn recording_filters(&self) -> Option<RecordingFiltersSnapshot> {
        self.get_json(RECORDING_FILTERS_KEY)
            .as_ref()
            .and_then(RecordingFiltersSnapshot::from_value)
    }

    pub fn set_recording_filters(
        &mut self,
        filters: Option<&RecordingFilters>,
    ) -> Result<(), serde_json::Error> {
        match filters {
            Some(filters) => {
                let value = serde_json::to_string(filters)?;
                self.insert(RECORDING_FILTERS_KEY, value);
            }
            None => {
                self.remove(RECORDING_FILTERS_KEY);
            }
        }
        Ok(())
    }

    /// 선택 경로 태그
    pub fn source(&self) -> Option<WatchedSource> {
        self.get(SOURCE_KEY).map(WatchedSource::parse)
    }

    pub fn set_source(&mut self, source: Option<WatchedSource>) {
        match source {
            Some(source) => self.insert(SOURCE_KEY, source.as_str()),
            None => {
                self.remove(SOURCE_KEY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filters::DurationFilter;

    #[test]
    fn parse_json_and_plain_values() {
        let params = HashParams::parse(
            "#sessionRecordingId=abc&recordingFilters=%7B%22date_from%22%3A%22-7d%22%7D&panel=open",
        );
        assert_eq!(params.session_recording_id().as_deref(), Some("abc"));
        assert_eq!(params.get("panel"), Some("open"));
        let filters = params.recording_filters().unwrap();
        assert_eq!(filters.date_from.as_deref(), Some("-7d"));
        assert!(filters.events.is_none());
    }

    #[test]
    fn json_looking_recording_ids_survive_roundtrip() {
        for id in ["12345", "1e3", "12345678901234567890123", "null", "true", "0.50", "\"quoted\""] {
            let mut params = HashParams::new();
            params.set_session_recording_id(Some(id));
            let reparsed = HashParams::parse(&params.to_fragment());
            assert_eq!(reparsed.session_recording_id().as_deref(), Some(id), "id {id}");
        }

        let params = HashParams::parse("sessionRecordingId=1e3&source=null");
        assert_eq!(params.session_recording_id().as_deref(), Some("1e3"));
        assert_eq!(params.source(), Some(WatchedSource::Unknown));
    }

    #[test]
    fn foreign_keys_keep_order_and_duplicates() {
        let mut params = HashParams::parse("z=1&tag=a&tag=b&a=2");
        params.set_session_recording_id(Some("r1"));
        params.set_source(Some(WatchedSource::Direct));
        assert_eq!(
            params.to_fragment(),
            "z=1&tag=a&tag=b&a=2&sessionRecordingId=r1&source=direct"
        );

        params.set_session_recording_id(Some("r2"));
        assert_eq!(
            params.to_fragment(),
            "z=1&tag=a&tag=b&a=2&sessionRecordingId=r2&source=direct"
        );
        assert_eq!(params.get("tag"), Some("a"));
    }

    #[test]
    fn insert_collapses_only_its_own_duplicates() {
        let mut params = HashParams::parse("sessionRecordingId=a&x=1&sessionRecordingId=b");
        params.set_session_recording_id(Some("c"));
        assert_eq!(params.to_fragment(), "sessionRecordingId=c&x=1");
        assert_eq!(params.remove("x").as_deref(), Some("1"));
        assert_eq!(params.get_json("missing"), None);
    }

    #[test]
    fn fragment_roundtrip_keeps_unknown_keys() {
        let mut params = HashParams::parse("tab=events&sessionRecordingId=r1");
        params.set_source(Some(WatchedSource::RecordingsList));
        params
            .set_recording_filters(Some(&RecordingFilters {
                actions: vec![],
                events: vec![],
                properties: vec![],
                date_from: Some("-21d".to_string()),
                date_to: None,
                offset: 0,
                session_recording_duration: DurationFilter::default(),
            }))
            .unwrap();

        let reparsed = HashParams::parse(&params.to_fragment());
        assert_eq!(reparsed, params);
        assert_eq!(reparsed.get("tab"), Some("events"));
        assert_eq!(reparsed.source(), Some(WatchedSource::RecordingsList));
    }

    #[test]
    fn clearing_keys() {
        let mut params = HashParams::parse("sessionRecordingId=r1&source=direct&recordingFilters=%7B%7D");
        params.set_session_recording_id(None);
        params.set_source(None);
        params.set_recording_filters(None).unwrap();
        assert!(params.is_empty());
        assert_eq!(params.to_fragment(), "");
    }

    #[test]
    fn malformed_filters_are_absent() {
        let params = HashParams::parse("recordingFilters=%5B1%2C2%5D");
        assert!(params.recording_filters().is_none());
        let params = HashParams::parse("recordingFilters=%7Bbroken");
        assert!(params.recording_filters().is_none());
    }
}
