//! 기능 플래그 포트.

/// 필터 UI 실험 플래그 키 (`"test"` 변형이면 필터 상시 표시)
pub const RECORDINGS_FILTER_EXPERIMENT: &str = "recordings-filter-experiment";

/// 기능 플래그 평가기
pub trait FeatureFlags: Send + Sync {
    /// 플래그 변형 값 (미평가/비활성이면 `None`)
    fn variant(&self, key: &str) -> Option<String>;

    /// 플래그가 특정 변형인지
    fn is_variant(&self, key: &str, variant: &str) -> bool {
        self.variant(key).as_deref() == Some(variant)
    }
}
