//! # replay-recordings
//!
//! 세션 녹화 목록 테이블.
//! 필터 상태를 소유하고 디바운스된 목록 조회를 발행하며,
//! 결과 페이지/선택 커서를 URL 해시와 동기화한다.
//!
//! ## 구조
//!
//! - [`table`]: 컨트롤러 ([`RecordingsTable`])
//! - [`state`]: 필터 상태, 스냅샷, 파생 값
//! - [`url_sync`]: 해시 파라미터 생성/비교
//! - [`history`]: 메모리 히스토리 라우터
//! - [`reporter`], [`flags`]: 분석/플래그 포트의 로컬 구현

pub mod flags;
pub mod history;
pub mod reporter;
pub mod state;
pub mod table;
pub mod url_sync;

pub use table::{FetchOutcome, RecordingsTable, TablePorts, TableProps, TableSettings};
