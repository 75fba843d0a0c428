//! URL 해시 동기화.
//!
//! 상태 → URL: [`build_hash`]가 현재 해시에서 테이블 소유 키만 다시 쓴다.
//! URL → 상태: [`diff_filters`]가 들어온 스냅샷과 현재 필터를 필드별로 비교해
//! 달라진 필드만 [`FilterDiff`]로 돌려준다. 형식이 잘못되었거나 빠진 필드는
//! 기본값으로 본다.

use replay_core::models::filters::{
    DurationFilter, EntityFilters, PropertyFilter, RecordingFilters, RecordingFiltersSnapshot,
};
use replay_core::models::hash_params::HashParams;
use replay_core::models::recording::WatchedSource;

use crate::state::FilterState;

/// 테이블 상태를 반영한 새 해시 파라미터
///
/// `filters`가 `None`이면 필터 키를 지운다. `source`는 선택이 있을 때만 기록.
/// 그 밖의 키는 건드리지 않는다.
pub fn build_hash(
    current: &HashParams,
    filters: Option<&RecordingFilters>,
    selected_id: Option<&str>,
    source: Option<WatchedSource>,
) -> Result<HashParams, serde_json::Error> {
    let mut hash = current.clone();
    hash.set_recording_filters(filters)?;
    hash.set_session_recording_id(selected_id);
    hash.set_source(selected_id.and(source));
    Ok(hash)
}

/// URL에서 읽은 필터 중 현재 상태와 다른 필드
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDiff {
    pub entity_filters: Option<EntityFilters>,
    pub property_filters: Option<Vec<PropertyFilter>>,
    pub date_range: Option<(Option<String>, Option<String>)>,
    pub offset: Option<u64>,
    pub duration_filter: Option<DurationFilter>,
}

impl FilterDiff {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 달라진 필드만 상태에 반영
    pub fn apply_to(self, state: &mut FilterState) {
        if let Some(entity_filters) = self.entity_filters {
            state.entity_filters = entity_filters;
        }
        if let Some(property_filters) = self.property_filters {
            state.property_filters = property_filters;
        }
        if let Some((from_date, to_date)) = self.date_range {
            state.from_date = from_date;
            state.to_date = to_date;
        }
        if let Some(offset) = self.offset {
            state.offset = offset;
        }
        if let Some(duration_filter) = self.duration_filter {
            state.duration_filter = duration_filter;
        }
    }
}

/// 들어온 스냅샷과 현재 필터 비교
///
/// 엔티티 필터는 이벤트/액션 목록만 비교한다. 빠진 날짜는 해당 범위를 지운 것으로 본다.
pub fn diff_filters(
    current: &FilterState,
    incoming: &RecordingFiltersSnapshot,
    default_duration: &DurationFilter,
) -> FilterDiff {
    let mut diff = FilterDiff::default();

    let events = incoming.events.clone().unwrap_or_default();
    let actions = incoming.actions.clone().unwrap_or_default();
    if events != current.entity_filters.events || actions != current.entity_filters.actions {
        diff.entity_filters = Some(EntityFilters::new(events, actions));
    }

    let properties = incoming.properties.clone().unwrap_or_default();
    if properties != current.property_filters {
        diff.property_filters = Some(properties);
    }

    if incoming.date_from != current.from_date || incoming.date_to != current.to_date {
        diff.date_range = Some((incoming.date_from.clone(), incoming.date_to.clone()));
    }

    let offset = incoming.offset.unwrap_or(0);
    if offset != current.offset {
        diff.offset = Some(offset);
    }

    let duration = incoming
        .session_recording_duration
        .clone()
        .unwrap_or_else(|| default_duration.clone());
    if duration != current.duration_filter {
        diff.duration_filter = Some(duration);
    }

    diff
}
