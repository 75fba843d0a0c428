//! 녹화 목록 단발 실행.
//!
//! 어댑터를 조립해 테이블을 마운트하고, 요청된 만큼 페이지를 넘긴 뒤
//! 선택을 반영하고 결과를 출력용으로 정리한다.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use replay_core::config::AppConfig;
use replay_core::error::CoreError;
use replay_core::models::location::TableLocation;
use replay_core::models::recording::{Recording, WatchedSource};
use replay_core::ports::recordings_api::RecordingsApi;
use replay_core::ports::router::UrlRouter;
use replay_network::http_client::HttpRecordingsClient;
use replay_recordings::flags::StaticFeatureFlags;
use replay_recordings::history::MemoryHistory;
use replay_recordings::reporter::TracingUsageReporter;
use replay_recordings::state::TableSnapshot;
use replay_recordings::{FetchOutcome, RecordingsTable, TablePorts, TableProps, TableSettings};
use tracing::{debug, info};
use uuid::Uuid;

/// CLI에서 받은 실행 요청
#[derive(Debug, Clone, Default)]
pub struct ListingRequest {
    /// 시작 URL (없으면 기본 화면 경로)
    pub href: Option<String>,
    pub person_uuid: Option<Uuid>,
    /// 첫 조회 후 넘길 페이지 수
    pub pages: u32,
    pub select: Option<String>,
    pub disable_filtering: bool,
}

/// 조립된 단발 실행
pub struct ListingRun {
    request: ListingRequest,
    props: TableProps,
    settings: TableSettings,
    api: Arc<dyn RecordingsApi>,
    history: Arc<MemoryHistory>,
}

impl ListingRun {
    /// 설정으로 HTTP 클라이언트를 만들어 조립
    pub fn from_config(config: &AppConfig, request: ListingRequest) -> Result<Self, CoreError> {
        let client = HttpRecordingsClient::new(
            &config.server.base_url,
            config.server.api_key.clone(),
            config.request_timeout(),
        )?
        .with_max_retries(config.server.max_retries);
        Ok(Self::new(config, request, Arc::new(client)))
    }

    pub fn new(config: &AppConfig, request: ListingRequest, api: Arc<dyn RecordingsApi>) -> Self {
        let href = request
            .href
            .clone()
            .unwrap_or_else(|| default_href(request.person_uuid));
        let history = Arc::new(MemoryHistory::from_href(&href));
        let location = table_location_for(&history.location().pathname, request.person_uuid);

        let props = TableProps {
            team_id: config.recordings.project_id,
            person_uuid: request.person_uuid,
            location,
            disable_filtering: request.disable_filtering,
        };
        Self {
            request,
            props,
            settings: TableSettings::from(&config.recordings),
            api,
            history,
        }
    }

    /// 마운트 → 페이지 이동 → 선택 → 결과 정리
    pub async fn execute(self) -> Result<ListingReport> {
        let ports = TablePorts {
            api: self.api,
            router: self.history.clone(),
            reporter: Arc::new(TracingUsageReporter),
            flags: Arc::new(StaticFeatureFlags::new()),
        };
        let source = watched_source_for(self.props.location);
        let table = RecordingsTable::mount(self.props, self.settings, ports);

        let mut outcome = table.wait_for_fetch().await;
        for page in 0..self.request.pages {
            debug!("다음 페이지로 이동 ({}/{})", page + 1, self.request.pages);
            table.advance_page();
            outcome = table.wait_for_fetch().await;
        }

        match outcome {
            Some(FetchOutcome::Failed(e)) => return Err(e.into()),
            Some(FetchOutcome::Applied { results, has_next }) => {
                info!("조회 결과 {results}건 (다음 페이지: {has_next})");
            }
            Some(FetchOutcome::Superseded) | None => {
                return Err(anyhow!("녹화 목록 조회가 완료되지 않았습니다"));
            }
        }

        if let Some(id) = self.request.select.as_deref() {
            table.select_recording(Some(id), Some(source));
        }

        Ok(ListingReport {
            key: table.key(),
            snapshot: table.snapshot(),
            href: self.history.location().to_href(),
        })
    }
}

/// 사람 지정 시 사람 페이지, 아니면 녹화 페이지
fn default_href(person_uuid: Option<Uuid>) -> String {
    match person_uuid {
        Some(uuid) => format!("/person/{uuid}"),
        None => TableLocation::RecordingsPage.url_pattern().to_string(),
    }
}

/// URL 경로에 맞는 테이블 배치 화면
fn table_location_for(pathname: &str, person_uuid: Option<Uuid>) -> TableLocation {
    if person_uuid.is_some() {
        return TableLocation::PersonPage;
    }
    [TableLocation::RecordingsPage, TableLocation::HomePage]
        .into_iter()
        .find(|location| location.matches(pathname))
        .unwrap_or_default()
}

fn watched_source_for(location: TableLocation) -> WatchedSource {
    match location {
        TableLocation::RecordingsPage => WatchedSource::RecordingsList,
        TableLocation::HomePage => WatchedSource::HomePage,
        TableLocation::PersonPage => WatchedSource::PersonPage,
    }
}

/// 실행 결과
#[derive(Debug)]
pub struct ListingReport {
    pub key: String,
    pub snapshot: TableSnapshot,
    /// 실행 후 히스토리 최상단 URL
    pub href: String,
}

impl ListingReport {
    /// 출력용 행
    pub fn lines(&self) -> Vec<String> {
        let snapshot = &self.snapshot;
        let mut lines = vec![format!(
            "[{}] offset={} 녹화 {}건",
            self.key,
            snapshot.filters.offset,
            snapshot.recordings().len()
        )];
        lines.extend(
            snapshot
                .recordings()
                .iter()
                .map(|r| recording_line(r, snapshot.selected_id.as_deref())),
        );
        if snapshot.has_next() {
            lines.push("(다음 페이지 있음)".to_string());
        }
        lines.push(format!("URL: {}", self.href));
        lines
    }
}

fn recording_line(recording: &Recording, selected_id: Option<&str>) -> String {
    let marker = if selected_id == Some(recording.id.as_str()) {
        '>'
    } else if recording.viewed {
        '*'
    } else {
        ' '
    };
    let duration = recording
        .recording_duration
        .map(|secs| format!("{secs:.0}s"))
        .unwrap_or_else(|| "-".to_string());
    let start = recording
        .start_time
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!(
        "{marker} {}  {duration:>6}  {}  {start}",
        recording.id,
        recording.distinct_id.as_deref().unwrap_or("-")
    )
}
