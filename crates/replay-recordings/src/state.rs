//! 테이블 상태와 파생 값.
//!
//! [`FilterState`]는 목록 쿼리를 완전히 결정하며 [`TableSnapshot`]은
//! 읽기 전용 복제본이다. 파생 값은 저장하지 않고 스냅샷에서 매번 계산한다.

use replay_core::models::filters::{
    DurationFilter, EntityFilters, PropertyFilter, RecordingFilters,
};
use replay_core::models::recording::{Recording, RecordingsPage};
use replay_core::ports::feature_flags::{FeatureFlags, RECORDINGS_FILTER_EXPERIMENT};

use crate::table::TableSettings;

/// 필터 상태
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub entity_filters: EntityFilters,
    pub property_filters: Vec<PropertyFilter>,
    pub duration_filter: DurationFilter,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub offset: u64,
}

impl FilterState {
    /// 설정의 기본값으로 초기화
    pub fn with_defaults(settings: &TableSettings) -> Self {
        Self {
            entity_filters: EntityFilters::default(),
            property_filters: Vec::new(),
            duration_filter: settings.default_duration.clone(),
            from_date: settings.default_from_date.clone(),
            to_date: None,
            offset: 0,
        }
    }

    /// 쿼리 투영 (순수 함수)
    pub fn to_recording_filters(&self) -> RecordingFilters {
        RecordingFilters {
            actions: self.entity_filters.actions.clone(),
            events: self.entity_filters.events.clone(),
            properties: self.property_filters.clone(),
            date_from: self.from_date.clone(),
            date_to: self.to_date.clone(),
            offset: self.offset,
            session_recording_duration: self.duration_filter.clone(),
        }
    }
}

/// 테이블 상태의 읽기 전용 스냅샷
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub filters: FilterState,
    pub page: RecordingsPage,
    pub selected_id: Option<String>,
    /// 필터 UI를 한 번이라도 연 적이 있는지
    pub filter_enabled: bool,
    /// 최신 조회가 아직 끝나지 않았는지
    pub loading: bool,
}

impl TableSnapshot {
    pub fn has_previous(&self) -> bool {
        self.filters.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.has_next
    }

    /// 필터 영역을 펼쳐 보여야 하는지
    pub fn filters_active(&self, flags: &dyn FeatureFlags) -> bool {
        self.filter_enabled
            || !self.filters.entity_filters.is_default()
            || !self.filters.property_filters.is_empty()
            || flags.is_variant(RECORDINGS_FILTER_EXPERIMENT, "test")
    }

    pub fn recordings(&self) -> &[Recording] {
        &self.page.results
    }

    /// 현재 페이지에서 선택된 녹화
    pub fn selected_recording(&self) -> Option<&Recording> {
        let id = self.selected_id.as_deref()?;
        self.page.results.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::StaticFeatureFlags;
    use replay_core::models::filters::{EntityFilter, PropertyOperator, PropertyType};
    use serde_json::json;

    fn snapshot() -> TableSnapshot {
        TableSnapshot {
            filters: FilterState::with_defaults(&TableSettings::default()),
            page: RecordingsPage {
                results: vec![Recording::with_id("a"), Recording::with_id("b")],
                has_next: true,
            },
            selected_id: None,
            filter_enabled: false,
            loading: false,
        }
    }

    #[test]
    fn defaults_project_to_query() {
        let filters = snapshot().filters.to_recording_filters();
        assert!(filters.events.is_empty());
        assert!(filters.actions.is_empty());
        assert!(filters.properties.is_empty());
        assert_eq!(filters.date_from.as_deref(), Some("-21d"));
        assert_eq!(filters.date_to, None);
        assert_eq!(filters.offset, 0);
        assert_eq!(filters.session_recording_duration, DurationFilter::longer_than(60));
    }

    #[test]
    fn projection_ignores_page_and_selection() {
        let mut a = snapshot();
        let mut b = snapshot();
        b.page = RecordingsPage::default();
        b.selected_id = Some("x".to_string());
        a.filters.offset = 100;
        b.filters.offset = 100;
        assert_eq!(
            a.filters.to_recording_filters(),
            b.filters.to_recording_filters()
        );
    }

    #[test]
    fn paging_flags() {
        let mut snap = snapshot();
        assert!(!snap.has_previous());
        assert!(snap.has_next());
        snap.filters.offset = 50;
        snap.page.has_next = false;
        assert!(snap.has_previous());
        assert!(!snap.has_next());
    }

    #[test]
    fn filters_active_conditions() {
        let flags = StaticFeatureFlags::new();
        let snap = snapshot();
        assert!(!snap.filters_active(&flags));

        let mut enabled = snapshot();
        enabled.filter_enabled = true;
        assert!(enabled.filters_active(&flags));

        let mut entity = snapshot();
        entity.filters.entity_filters = EntityFilters::new(vec![EntityFilter::event("$pageview")], vec![]);
        assert!(entity.filters_active(&flags));

        let mut property = snapshot();
        property.filters.property_filters = vec![PropertyFilter {
            key: "$os".to_string(),
            value: json!("Mac OS X"),
            operator: Some(PropertyOperator::Exact),
            property_type: PropertyType::Person,
        }];
        assert!(property.filters_active(&flags));

        let experiment = StaticFeatureFlags::new().with_variant(RECORDINGS_FILTER_EXPERIMENT, "test");
        assert!(snap.filters_active(&experiment));
        let control = StaticFeatureFlags::new().with_variant(RECORDINGS_FILTER_EXPERIMENT, "control");
        assert!(!snap.filters_active(&control));
    }

    #[test]
    fn selected_recording_lookup() {
        let mut snap = snapshot();
        assert!(snap.selected_recording().is_none());
        snap.selected_id = Some("b".to_string());
        assert_eq!(snap.selected_recording().map(|r| r.id.as_str()), Some("b"));
        snap.selected_id = Some("gone".to_string());
        assert!(snap.selected_recording().is_none());
    }
}
