//! 사용 분석 리포터 (tracing 출력).

use std::time::Duration;

use replay_core::ports::usage::UsageReporter;
use tracing::info;

/// 사용 이벤트를 로그로만 남기는 리포터
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUsageReporter;

impl UsageReporter for TracingUsageReporter {
    fn report_recordings_list_fetched(&self, load_time: Duration) {
        info!(
            load_time_ms = load_time.as_millis() as u64,
            "녹화 목록 조회 완료"
        );
    }
}
