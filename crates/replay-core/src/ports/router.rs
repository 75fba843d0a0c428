//! URL 라우터 포트.
//!
//! 브라우저 히스토리 혹은 그에 준하는 위치 저장소.
//! 구현: `replay-recordings::history::MemoryHistory`

use crate::models::location::{HistoryMode, Location};

/// URL/히스토리 저장소
pub trait UrlRouter: Send + Sync {
    /// 현재 위치
    fn location(&self) -> Location;

    /// 위치 이동 (새 항목 추가 또는 현재 항목 교체)
    fn navigate(&self, location: Location, mode: HistoryMode);
}
