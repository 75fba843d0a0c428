//! # replay-app
//!
//! Replay 클라이언트 바이너리 진입점.
//! 설정 로드, 어댑터 생성(DI), 녹화 목록 한 번 조회 후 결과 출력.

mod runner;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use replay_core::config::AppConfig;
use replay_core::config_manager::ConfigManager;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::runner::{ListingRequest, ListingRun};

/// Replay 녹화 목록 클라이언트
///
/// 세션 녹화 목록을 조회하고 URL 해시 상태를 재현한다
#[derive(Parser, Debug)]
#[command(name = "replay")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 서버 URL 지정
    #[arg(long, short = 's')]
    server: Option<String>,

    /// 개인 API 키
    #[arg(long)]
    api_key: Option<String>,

    /// 프로젝트(팀) ID
    #[arg(long, short = 'p')]
    project: Option<u64>,

    /// 시작 URL (`/recordings#recordingFilters=...` 형태 또는 절대 URL)
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// 특정 사람의 녹화만 조회
    #[arg(long)]
    person: Option<Uuid>,

    /// 첫 조회 후 넘길 페이지 수
    #[arg(long, default_value = "0")]
    page: u32,

    /// 조회 후 선택할 녹화 ID
    #[arg(long)]
    select: Option<String>,

    /// URL에 필터를 기록/해석하지 않음
    #[arg(long)]
    no_filters: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

/// 설정 로드 (CLI 경로 또는 플랫폼 기본 경로)
fn load_config(path: Option<PathBuf>) -> Result<ConfigManager> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    info!("설정 파일: {}", manager.config_path().display());
    Ok(manager)
}

/// CLI 인자로 설정 오버라이드
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(ref server_url) = args.server {
        config.server.base_url = server_url.clone();
    }
    if let Some(ref api_key) = args.api_key {
        config.server.api_key = Some(api_key.clone());
    }
    if let Some(project) = args.project {
        config.recordings.project_id = project;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "replay={},replay_app={},replay_core={},replay_network={},replay_recordings={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("Replay 클라이언트 시작");

    let manager = load_config(args.config.clone())?;
    let mut config = manager.get();
    apply_overrides(&mut config, &args);
    info!(
        "서버: {}, 프로젝트: {}",
        config.server.base_url, config.recordings.project_id
    );

    let request = ListingRequest {
        href: args.url.clone(),
        person_uuid: args.person,
        pages: args.page,
        select: args.select.clone(),
        disable_filtering: args.no_filters,
    };
    let report = ListingRun::from_config(&config, request)?.execute().await?;

    for line in report.lines() {
        println!("{line}");
    }
    Ok(())
}
