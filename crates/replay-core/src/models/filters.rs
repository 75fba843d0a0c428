//! 녹화 목록 필터 모델.
//!
//! 엔티티(이벤트/액션) 필터, 속성 필터, 녹화 길이 필터와
//! 필터 상태를 쿼리 파라미터로 투영한 [`RecordingFilters`]를 정의한다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 기본 최소 녹화 길이 (초)
pub const DEFAULT_MIN_DURATION_SECS: u64 = 60;

/// 기본 조회 시작일 (상대 표현)
pub const DEFAULT_FROM_DATE: &str = "-21d";

/// 속성 비교 연산자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyOperator {
    Exact,
    IsNot,
    Icontains,
    NotIcontains,
    Regex,
    NotRegex,
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "lt")]
    LessThan,
    IsSet,
    IsNotSet,
    IsDateBefore,
    IsDateAfter,
}

/// 속성 필터가 적용되는 대상
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    Event,
    Person,
    Element,
    Session,
    Cohort,
    Group,
    Recording,
}

/// 임의 속성에 대한 조건식
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// 속성 키
    pub key: String,
    /// 비교 값 (문자열, 숫자, 배열 모두 가능)
    #[serde(default)]
    pub value: Value,
    /// 비교 연산자 (없으면 exact)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<PropertyOperator>,
    /// 적용 대상
    #[serde(rename = "type", default)]
    pub property_type: PropertyType,
}

/// 엔티티 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Events,
    Actions,
    NewEntity,
}

/// 엔티티 식별자: 액션은 숫자 ID, 이벤트는 이벤트 이름
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Name(String),
}

/// 이벤트 또는 액션 참조 필터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFilter {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(rename = "type", default)]
    pub entity_type: Option<EntityType>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    /// 엔티티 단위 속성 조건
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyFilter>,
}

impl EntityFilter {
    /// 이름으로 이벤트 필터 생성
    pub fn event(name: &str) -> Self {
        Self {
            id: Some(EntityId::Name(name.to_string())),
            entity_type: Some(EntityType::Events),
            order: None,
            name: Some(name.to_string()),
            properties: Vec::new(),
        }
    }

    /// 숫자 ID로 액션 필터 생성
    pub fn action(id: i64) -> Self {
        Self {
            id: Some(EntityId::Number(id)),
            entity_type: Some(EntityType::Actions),
            order: None,
            name: None,
            properties: Vec::new(),
        }
    }
}

/// 엔티티 필터 묶음
///
/// 기본값은 이벤트/액션이 비어 있고 빈 `new_entity` 슬롯 하나를 가진 형태다.
/// 역직렬화 시 누락된 필드는 빈 목록이 된다 (부분 지정 그대로 교체).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFilters {
    #[serde(default)]
    pub events: Vec<EntityFilter>,
    #[serde(default)]
    pub actions: Vec<EntityFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_entity: Vec<EntityFilter>,
}

impl EntityFilters {
    /// 이벤트/액션 목록만 지정
    pub fn new(events: Vec<EntityFilter>, actions: Vec<EntityFilter>) -> Self {
        Self {
            events,
            actions,
            new_entity: Vec::new(),
        }
    }

    /// 기본 형태인지 (구조적 비교)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for EntityFilters {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            actions: Vec::new(),
            new_entity: vec![EntityFilter {
                id: None,
                entity_type: Some(EntityType::Events),
                order: Some(0),
                name: None,
                properties: Vec::new(),
            }],
        }
    }
}

/// 녹화 길이 필터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationFilter {
    #[serde(rename = "type", default = "default_duration_type")]
    pub property_type: PropertyType,
    #[serde(default = "default_duration_key")]
    pub key: String,
    pub operator: PropertyOperator,
    /// 기준 길이 (초)
    pub value: u64,
}

impl DurationFilter {
    /// `value`초보다 긴 녹화
    pub fn longer_than(value: u64) -> Self {
        Self {
            property_type: PropertyType::Recording,
            key: default_duration_key(),
            operator: PropertyOperator::GreaterThan,
            value,
        }
    }

    /// `value`초보다 짧은 녹화
    pub fn shorter_than(value: u64) -> Self {
        Self {
            operator: PropertyOperator::LessThan,
            ..Self::longer_than(value)
        }
    }
}

impl Default for DurationFilter {
    fn default() -> Self {
        Self::longer_than(DEFAULT_MIN_DURATION_SECS)
    }
}

fn default_duration_type() -> PropertyType {
    PropertyType::Recording
}

fn default_duration_key() -> String {
    "duration".to_string()
}

/// 필터 상태의 쿼리 투영
///
/// 목록 API 쿼리 파라미터와 URL의 `recordingFilters` 스냅샷 양쪽에 쓰인다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordingFilters {
    pub actions: Vec<EntityFilter>,
    pub events: Vec<EntityFilter>,
    pub properties: Vec<PropertyFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    pub offset: u64,
    pub session_recording_duration: DurationFilter,
}

impl RecordingFilters {
    /// 쿼리 문자열 쌍으로 변환
    ///
    /// 배열/객체는 JSON 문자열로, 값이 없는 날짜는 생략한다.
    pub fn to_query_pairs(&self) -> Result<Vec<(String, String)>, serde_json::Error> {
        let mut pairs = vec![
            ("actions".to_string(), serde_json::to_string(&self.actions)?),
            ("events".to_string(), serde_json::to_string(&self.events)?),
            (
                "properties".to_string(),
                serde_json::to_string(&self.properties)?,
            ),
        ];
        if let Some(date_from) = &self.date_from {
            pairs.push(("date_from".to_string(), date_from.clone()));
        }
        if let Some(date_to) = &self.date_to {
            pairs.push(("date_to".to_string(), date_to.clone()));
        }
        pairs.push(("offset".to_string(), self.offset.to_string()));
        pairs.push((
            "session_recording_duration".to_string(),
            serde_json::to_string(&self.session_recording_duration)?,
        ));
        Ok(pairs)
    }
}

/// URL에서 읽은 필터 스냅샷
///
/// 필드 단위로 관대하게 파싱한다. 형식이 잘못된 필드는 없는 것으로 취급.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingFiltersSnapshot {
    pub actions: Option<Vec<EntityFilter>>,
    pub events: Option<Vec<EntityFilter>>,
    pub properties: Option<Vec<PropertyFilter>>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub offset: Option<u64>,
    pub session_recording_duration: Option<DurationFilter>,
}

impl RecordingFiltersSnapshot {
    /// JSON 객체에서 필드별로 추출 (객체가 아니면 `None`)
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        fn field<T: serde::de::DeserializeOwned>(
            object: &serde_json::Map<String, Value>,
            key: &str,
        ) -> Option<T> {
            object
                .get(key)
                .filter(|v| !v.is_null())
                .and_then(|v| serde_json::from_value(v.clone()).ok())
        }

        Some(Self {
            actions: field(object, "actions"),
            events: field(object, "events"),
            properties: field(object, "properties"),
            date_from: field(object, "date_from"),
            date_to: field(object, "date_to"),
            offset: field(object, "offset"),
            session_recording_duration: field(object, "session_recording_duration"),
        })
    }
}
