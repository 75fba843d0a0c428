//! 메모리 히스토리 라우터.
//!
//! 브라우저 히스토리 스택을 흉내 내는 `UrlRouter` 구현.
//! CLI 실행과 테스트에서 URL 동기화를 관찰하는 데 쓴다.

use std::collections::VecDeque;

use parking_lot::Mutex;
use replay_core::models::location::{HistoryMode, Location};
use replay_core::ports::router::UrlRouter;
use tracing::debug;

/// 기본 최대 항목 수
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// 히스토리 스택 (FIFO 최대 크기 제한, 항상 한 개 이상의 항목을 가진다)
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Mutex<VecDeque<Location>>,
    max_entries: usize,
}

impl MemoryHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: Mutex::new(VecDeque::from([initial])),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// `/path#fragment` 또는 절대 URL에서 시작
    pub fn from_href(href: &str) -> Self {
        Self::new(Location::from_href(href))
    }

    /// 최대 항목 수 설정 (최소 1)
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// 스택 깊이
    pub fn depth(&self) -> usize {
        self.entries.lock().len()
    }

    /// 전체 항목 복제본 (오래된 순)
    pub fn entries(&self) -> Vec<Location> {
        self.entries.lock().iter().cloned().collect()
    }

    /// 뒤로 가기: 이동한 위치 반환 (첫 항목이면 `None`)
    pub fn back(&self) -> Option<Location> {
        let mut entries = self.entries.lock();
        if entries.len() <= 1 {
            return None;
        }
        entries.pop_back();
        entries.back().cloned()
    }
}

impl UrlRouter for MemoryHistory {
    fn location(&self) -> Location {
        self.entries.lock().back().cloned().unwrap_or_default()
    }

    fn navigate(&self, location: Location, mode: HistoryMode) {
        debug!("히스토리 {:?}: {}", mode, location.to_href());
        let mut entries = self.entries.lock();
        match mode {
            HistoryMode::Push => {
                if entries.len() >= self.max_entries {
                    entries.pop_front();
                }
                entries.push_back(location);
            }
            HistoryMode::Replace => match entries.back_mut() {
                Some(last) => *last = location,
                None => entries.push_back(location),
            },
        }
    }
}
