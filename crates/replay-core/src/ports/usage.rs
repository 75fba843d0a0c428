//! 사용 분석 리포터 포트.
//!
//! 구현: `replay-recordings::reporter::TracingUsageReporter`

use std::time::Duration;

/// 사용 이벤트 리포터
pub trait UsageReporter: Send + Sync {
    /// 녹화 목록 조회 완료 (응답 대기 시간)
    fn report_recordings_list_fetched(&self, load_time: Duration);
}
