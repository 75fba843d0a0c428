//! 고정 기능 플래그.

use std::collections::HashMap;

use replay_core::ports::feature_flags::FeatureFlags;

/// 미리 정해진 플래그 변형을 돌려주는 평가기
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureFlags {
    variants: HashMap<String, String>,
}

impl StaticFeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, key: &str, variant: &str) -> Self {
        self.variants.insert(key.to_string(), variant.to_string());
        self
    }
}

impl FeatureFlags for StaticFeatureFlags {
    fn variant(&self, key: &str) -> Option<String> {
        self.variants.get(key).cloned()
    }
}
