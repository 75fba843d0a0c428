//! 녹화 목록 테이블 컨트롤러.
//!
//! 필터 상태를 소유하고, 필터가 바뀔 때마다 디바운스된 목록 조회를 발행하며,
//! 조회 결과 페이지와 선택 커서를 관리하고 URL 해시와 동기화한다.
//!
//! ## 조회 규칙
//!
//! - 조회를 발행할 때마다 세대(generation) 번호가 1 증가한다.
//! - 디바운스 창 동안 더 새로운 조회가 발행되면 요청 자체를 생략한다.
//! - 응답이 도착했을 때 세대가 바뀌었으면 결과를 버린다 ("마지막 발행 우선").
//! - 실패하면 기존 페이지를 유지한다.
//!
//! ## URL 동기화
//!
//! - 상태 변경 연산은 마지막에 URL을 다시 쓴다. 필터 변경은 현재 항목 교체,
//!   선택 변경은 새 항목 추가.
//! - [`RecordingsTable::handle_navigation`]은 상태만 바꾸고 URL은 쓰지 않는다.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use replay_core::config::RecordingsConfig;
use replay_core::error::CoreError;
use replay_core::models::filters::{DurationFilter, EntityFilters, PropertyFilter};
use replay_core::models::hash_params::HashParams;
use replay_core::models::location::{HistoryMode, Location, TableLocation};
use replay_core::models::recording::{RecordingsPage, WatchedSource};
use replay_core::ports::feature_flags::FeatureFlags;
use replay_core::ports::recordings_api::{RecordingsApi, RecordingsQuery};
use replay_core::ports::router::UrlRouter;
use replay_core::ports::usage::UsageReporter;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::{FilterState, TableSnapshot};
use crate::url_sync::{build_hash, diff_filters};

/// 테이블 인스턴스 속성
#[derive(Debug, Clone, Default)]
pub struct TableProps {
    /// 프로젝트(팀) ID
    pub team_id: u64,
    /// 특정 사람의 녹화만 볼 때
    pub person_uuid: Option<Uuid>,
    /// 테이블이 배치된 화면 (반응할 URL 패턴 결정)
    pub location: TableLocation,
    /// URL에 필터를 기록/해석하지 않음
    pub disable_filtering: bool,
}

impl TableProps {
    /// 인스턴스 키: 사람 UUID, 없으면 화면 이름
    pub fn key(&self) -> String {
        match &self.person_uuid {
            Some(uuid) => uuid.to_string(),
            None => self.location.as_str().to_string(),
        }
    }
}

/// 테이블 동작 설정
#[derive(Debug, Clone)]
pub struct TableSettings {
    pub page_size: u32,
    /// 조회 디바운스 창
    pub debounce: Duration,
    pub default_from_date: Option<String>,
    pub default_duration: DurationFilter,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self::from(&RecordingsConfig::default())
    }
}

impl From<&RecordingsConfig> for TableSettings {
    fn from(config: &RecordingsConfig) -> Self {
        Self {
            page_size: config.page_size,
            debounce: config.debounce(),
            default_from_date: Some(config.default_from_date.clone())
                .filter(|d| !d.is_empty()),
            default_duration: DurationFilter::longer_than(config.default_min_duration_secs),
        }
    }
}

/// 테이블이 호출하는 외부 협력자
#[derive(Clone)]
pub struct TablePorts {
    pub api: Arc<dyn RecordingsApi>,
    pub router: Arc<dyn UrlRouter>,
    pub reporter: Arc<dyn UsageReporter>,
    pub flags: Arc<dyn FeatureFlags>,
}

/// 한 번의 조회 결과
#[derive(Debug)]
pub enum FetchOutcome {
    /// 페이지가 교체됨
    Applied { results: usize, has_next: bool },
    /// 더 새로운 조회가 발행되어 버려짐
    Superseded,
    /// 요청 실패 (기존 페이지 유지)
    Failed(CoreError),
}

#[derive(Debug)]
struct TableState {
    filters: FilterState,
    page: RecordingsPage,
    selected_id: Option<String>,
    filter_enabled: bool,
    loading: bool,
    /// 마지막으로 발행한 조회 세대
    generation: u64,
}

impl TableState {
    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            filters: self.filters.clone(),
            page: self.page.clone(),
            selected_id: self.selected_id.clone(),
            filter_enabled: self.filter_enabled,
            loading: self.loading,
        }
    }

    /// 선택 커서 이동 + 해당 녹화를 시청 처리
    fn select(&mut self, id: Option<&str>) {
        self.selected_id = id.map(str::to_string);
        if let Some(id) = id {
            for recording in self.page.results.iter_mut().filter(|r| r.id == id) {
                recording.viewed = true;
            }
        }
    }
}

struct TableInner {
    props: TableProps,
    settings: TableSettings,
    ports: TablePorts,
    state: Mutex<TableState>,
    latest_fetch: Mutex<Option<JoinHandle<FetchOutcome>>>,
}

impl TableInner {
    fn is_current(&self, generation: u64) -> bool {
        self.state.lock().generation == generation
    }

    fn query(&self) -> RecordingsQuery {
        RecordingsQuery {
            team_id: self.props.team_id,
            filters: self.state.lock().filters.to_recording_filters(),
            person_uuid: self.props.person_uuid,
            limit: self.settings.page_size,
        }
    }

    async fn run_fetch(self: Arc<Self>, generation: u64) -> FetchOutcome {
        tokio::time::sleep(self.settings.debounce).await;
        if !self.is_current(generation) {
            debug!("조회 생략 (세대 {generation}): 더 새로운 조회 발행됨");
            return FetchOutcome::Superseded;
        }

        let query = self.query();
        let started = Instant::now();
        let result = self.ports.api.list_recordings(&query).await;

        match result {
            Ok(page) => {
                self.ports
                    .reporter
                    .report_recordings_list_fetched(started.elapsed());

                let mut state = self.state.lock();
                if state.generation != generation {
                    debug!("응답 폐기 (세대 {generation} < {})", state.generation);
                    return FetchOutcome::Superseded;
                }
                let outcome = FetchOutcome::Applied {
                    results: page.results.len(),
                    has_next: page.has_next,
                };
                state.page = page;
                state.loading = false;
                debug!("페이지 교체 (세대 {generation}): {outcome:?}");
                outcome
            }
            Err(e) => {
                warn!("녹화 목록 조회 실패 (key={}): {e}", self.props.key());
                let mut state = self.state.lock();
                if state.generation == generation {
                    state.loading = false;
                }
                FetchOutcome::Failed(e)
            }
        }
    }
}

/// 녹화 목록 테이블
///
/// 복제해도 같은 상태를 공유한다. 조회는 tokio 태스크로 실행되므로
/// 런타임 안에서 생성/사용해야 한다.
#[derive(Clone)]
pub struct RecordingsTable {
    inner: Arc<TableInner>,
}

impl RecordingsTable {
    /// 테이블 마운트
    ///
    /// 기본 필터로 시작해서, 현재 URL이 이 테이블의 패턴과 맞으면 해시 상태를
    /// 반영한 뒤 첫 조회를 발행한다.
    pub fn mount(props: TableProps, settings: TableSettings, ports: TablePorts) -> Self {
        let state = TableState {
            filters: FilterState::with_defaults(&settings),
            page: RecordingsPage::default(),
            selected_id: None,
            filter_enabled: false,
            loading: false,
            generation: 0,
        };
        let table = Self {
            inner: Arc::new(TableInner {
                props,
                settings,
                ports,
                state: Mutex::new(state),
                latest_fetch: Mutex::new(None),
            }),
        };

        let location = table.inner.ports.router.location();
        if table.inner.props.location.matches(&location.pathname) {
            table.apply_hash(&location.hash);
        }

        info!(
            "녹화 테이블 마운트: key={}, pattern={}",
            table.key(),
            table.inner.props.location.url_pattern()
        );
        table.fetch_list();
        table
    }

    pub fn key(&self) -> String {
        self.inner.props.key()
    }

    pub fn props(&self) -> &TableProps {
        &self.inner.props
    }

    /// 현재 상태 스냅샷
    pub fn snapshot(&self) -> TableSnapshot {
        self.inner.state.lock().snapshot()
    }

    /// 필터 영역 표시 여부 (주입된 기능 플래그 사용)
    pub fn filters_active(&self) -> bool {
        self.snapshot().filters_active(self.inner.ports.flags.as_ref())
    }

    /// 목록 조회 발행: 이전에 발행한 조회는 무효가 된다
    pub fn fetch_list(&self) {
        let generation = {
            let mut state = self.inner.state.lock();
            state.generation += 1;
            state.loading = true;
            state.generation
        };
        debug!("조회 발행: key={}, 세대={generation}", self.key());

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(inner.run_fetch(generation));
        *self.inner.latest_fetch.lock() = Some(handle);
    }

    /// 마지막으로 발행한 조회가 끝날 때까지 대기
    ///
    /// 기다릴 조회가 없으면 `None`.
    pub async fn wait_for_fetch(&self) -> Option<FetchOutcome> {
        let handle = self.inner.latest_fetch.lock().take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("조회 태스크 조인 실패: {e}");
                None
            }
        }
    }

    // ============================================================
    // 선택
    // ============================================================

    /// 녹화 선택 (조회 없음, 히스토리 항목 추가)
    pub fn select_recording(&self, id: Option<&str>, source: Option<WatchedSource>) {
        self.inner.state.lock().select(id);
        self.sync_url(HistoryMode::Push, source);
    }

    /// 선택 해제
    pub fn clear_selection(&self) {
        self.inner.state.lock().selected_id = None;
        self.sync_url(HistoryMode::Push, None);
    }

    // ============================================================
    // 필터
    // ============================================================

    pub fn set_entity_filters(&self, filters: EntityFilters) {
        self.update_filters(|f| f.entity_filters = filters);
    }

    pub fn set_property_filters(&self, filters: Vec<PropertyFilter>) {
        self.update_filters(|f| f.property_filters = filters);
    }

    /// 날짜 범위 설정 (`None`은 해당 경계 해제)
    pub fn set_date_range(&self, from_date: Option<String>, to_date: Option<String>) {
        self.update_filters(|f| {
            f.from_date = from_date;
            f.to_date = to_date;
        });
    }

    pub fn set_duration_filter(&self, filter: DurationFilter) {
        self.update_filters(|f| f.duration_filter = filter);
    }

    /// 다음 페이지 (u64 최댓값에서 멈춤)
    pub fn advance_page(&self) {
        let page_size = u64::from(self.inner.settings.page_size);
        self.update_filters(|f| f.offset = f.offset.saturating_add(page_size));
    }

    /// 이전 페이지 (0 아래로 내려가지 않음, 0이어도 다시 조회)
    pub fn retreat_page(&self) {
        let page_size = u64::from(self.inner.settings.page_size);
        self.update_filters(|f| f.offset = f.offset.saturating_sub(page_size));
    }

    pub fn set_offset(&self, offset: u64) {
        self.update_filters(|f| f.offset = offset);
    }

    /// 필터 UI 표시 (한 번 켜면 유지)
    pub fn enable_filter_ui(&self) {
        self.inner.state.lock().filter_enabled = true;
    }

    // ============================================================
    // URL 동기화
    // ============================================================

    /// 내비게이션 이벤트 처리 (URL → 상태)
    ///
    /// 패턴이 맞지 않으면 무시한다. 필터가 하나라도 바뀌면 조회를 한 번 발행한다.
    /// URL은 다시 쓰지 않는다.
    pub fn handle_navigation(&self, location: &Location) {
        if !self.inner.props.location.matches(&location.pathname) {
            return;
        }
        if self.apply_hash(&location.hash) {
            self.fetch_list();
        }
    }

    /// 해시 상태 반영: 필터가 바뀌었으면 `true`
    fn apply_hash(&self, hash: &HashParams) -> bool {
        let incoming_id = hash.session_recording_id();
        let mut state = self.inner.state.lock();

        if incoming_id != state.selected_id {
            debug!(
                "URL 선택 반영: {:?} (source={})",
                incoming_id,
                hash.source().unwrap_or(WatchedSource::Direct).as_str()
            );
            state.select(incoming_id.as_deref());
        }

        if self.inner.props.disable_filtering {
            return false;
        }
        let Some(snapshot) = hash.recording_filters() else {
            return false;
        };

        let diff = diff_filters(&state.filters, &snapshot, &self.inner.settings.default_duration);
        if diff.is_empty() {
            return false;
        }
        debug!("URL 필터 반영: {diff:?}");
        diff.apply_to(&mut state.filters);
        true
    }

    /// 필터 변경 + URL 교체 + 조회
    fn update_filters(&self, update: impl FnOnce(&mut FilterState)) {
        update(&mut self.inner.state.lock().filters);
        self.sync_url(HistoryMode::Replace, None);
        self.fetch_list();
    }

    /// 상태 → URL
    fn sync_url(&self, mode: HistoryMode, source: Option<WatchedSource>) {
        let (filters, selected_id) = {
            let state = self.inner.state.lock();
            (state.filters.to_recording_filters(), state.selected_id.clone())
        };
        let filters = (!self.inner.props.disable_filtering).then_some(&filters);

        let router = &self.inner.ports.router;
        let current = router.location();
        match build_hash(&current.hash, filters, selected_id.as_deref(), source) {
            Ok(hash) => router.navigate(Location::new(&current.pathname, hash), mode),
            Err(e) => warn!("URL 해시 직렬화 실패: {e}"),
        }
    }
}
