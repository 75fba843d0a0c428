//! 녹화 목록 API 포트.
//!
//! 구현: `replay-network` crate (reqwest)

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::filters::RecordingFilters;
use crate::models::recording::RecordingsPage;

/// 녹화 목록 조회 요청
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingsQuery {
    /// 프로젝트(팀) ID
    pub team_id: u64,
    /// 필터 상태의 투영
    pub filters: RecordingFilters,
    /// 특정 사람으로 범위를 좁힐 때
    pub person_uuid: Option<Uuid>,
    /// 페이지 크기
    pub limit: u32,
}

impl RecordingsQuery {
    /// 쿼리 문자열 쌍
    pub fn to_query_pairs(&self) -> Result<Vec<(String, String)>, CoreError> {
        let mut pairs = self.filters.to_query_pairs()?;
        if let Some(person_uuid) = &self.person_uuid {
            pairs.push(("person_uuid".to_string(), person_uuid.to_string()));
        }
        pairs.push(("limit".to_string(), self.limit.to_string()));
        Ok(pairs)
    }

    /// 프로젝트 범위 목록 엔드포인트 경로
    pub fn path(&self) -> String {
        format!("/api/projects/{}/session_recordings", self.team_id)
    }
}

/// 녹화 목록 API
#[async_trait]
pub trait RecordingsApi: Send + Sync {
    /// 필터에 맞는 녹화 한 페이지 조회
    async fn list_recordings(&self, query: &RecordingsQuery) -> Result<RecordingsPage, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filters::DurationFilter;

    fn query(person_uuid: Option<Uuid>) -> RecordingsQuery {
        RecordingsQuery {
            team_id: 2,
            filters: RecordingFilters {
                actions: vec![],
                events: vec![],
                properties: vec![],
                date_from: Some("-21d".to_string()),
                date_to: None,
                offset: 0,
                session_recording_duration: DurationFilter::default(),
            },
            person_uuid,
            limit: 50,
        }
    }

    #[test]
    fn path_is_project_scoped() {
        assert_eq!(query(None).path(), "/api/projects/2/session_recordings");
    }

    #[test]
    fn person_uuid_only_when_scoped() {
        let unscoped = query(None).to_query_pairs().unwrap();
        assert!(unscoped.iter().all(|(k, _)| k != "person_uuid"));
        assert_eq!(unscoped.last(), Some(&("limit".to_string(), "50".to_string())));

        let uuid = Uuid::new_v4();
        let scoped = query(Some(uuid)).to_query_pairs().unwrap();
        assert!(scoped.contains(&("person_uuid".to_string(), uuid.to_string())));
    }
}
