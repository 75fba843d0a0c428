//! 녹화 목록 HTTP 클라이언트.
//!
//! `RecordingsApi` 포트 구현. API 키 인증 헤더 자동 주입 + 재시도 로직.

use async_trait::async_trait;
use replay_core::error::CoreError;
use replay_core::models::recording::RecordingsPage;
use replay_core::ports::recordings_api::{RecordingsApi, RecordingsQuery};
use std::time::Duration;
use tracing::{debug, warn};

/// 기본 재시도 횟수
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Retry-After 헤더가 없을 때 대기 시간 (초)
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// 녹화 목록 REST 클라이언트: `RecordingsApi` 포트 구현
pub struct HttpRecordingsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    max_retries: u32,
}

impl HttpRecordingsClient {
    /// 새 HTTP 클라이언트 생성
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// 재시도 횟수 설정
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// API 키가 있으면 Authorization 헤더를 붙인 요청 빌더 반환
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        match status.as_u16() {
            401 | 403 => Err(CoreError::Auth(format!("인증 실패 ({status}): {text}"))),
            404 => Err(CoreError::NotFound {
                resource_type: "Project".to_string(),
                id: text,
            }),
            429 => Err(CoreError::RateLimit {
                retry_after_secs: retry_after,
            }),
            503 => Err(CoreError::ServiceUnavailable(text)),
            _ => Err(CoreError::Internal(format!("API 에러 ({status}): {text}"))),
        }
    }

    /// 재시도가 포함된 요청 실행
    ///
    /// exponential backoff: 1s → 2s → 4s (최대 30s)
    async fn execute_with_retry<F, Fut, T>(&self, operation: F) -> Result<T, CoreError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut delay = Duration::from_secs(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !e.is_transient() || attempt >= self.max_retries {
                        return Err(e);
                    }

                    // RateLimit의 경우 서버 지정 대기 시간 사용
                    if let CoreError::RateLimit { retry_after_secs } = &e {
                        delay = Duration::from_secs(*retry_after_secs);
                    }

                    warn!(
                        "요청 실패 (시도 {}/{}): {e}, {delay:?} 후 재시도",
                        attempt + 1,
                        self.max_retries + 1
                    );

                    attempt += 1;
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(Duration::from_secs(30));
                }
            }
        }
    }
}

#[async_trait]
impl RecordingsApi for HttpRecordingsClient {
    async fn list_recordings(&self, query: &RecordingsQuery) -> Result<RecordingsPage, CoreError> {
        let path = query.path();
        let params = query.to_query_pairs()?;
        debug!(
            "녹화 목록 조회: team_id={}, offset={}",
            query.team_id, query.filters.offset
        );

        self.execute_with_retry(|| async {
            let resp = self
                .request(reqwest::Method::GET, &path)
                .query(&params)
                .send()
                .await
                .map_err(|e| CoreError::Network(format!("녹화 목록 요청 실패: {e}")))?;

            let resp = self.check_response(resp).await?;
            let page: RecordingsPage = resp
                .json()
                .await
                .map_err(|e| CoreError::Internal(format!("녹화 목록 응답 파싱 실패: {e}")))?;

            debug!(
                "녹화 목록 수신: {}건, has_next={}",
                page.results.len(),
                page.has_next
            );
            Ok(page)
        })
        .await
    }
}
