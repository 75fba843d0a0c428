//! # replay-network
//!
//! 녹화 목록 HTTP 어댑터.
//! 프로젝트 범위 녹화 목록 엔드포인트를 호출하는 `RecordingsApi` 포트 구현을 제공하며
//! API 키 인증, 상태 코드별 에러 매핑, 재시도를 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use replay_network::http_client::HttpRecordingsClient;
//!
//! let client = HttpRecordingsClient::new("https://app.example.com", Some(key), timeout)?;
//! let page = client.list_recordings(&query).await?;
//! ```

pub mod http_client;
