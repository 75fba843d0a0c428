//! URL 위치와 히스토리 모델.

use serde::{Deserialize, Serialize};

use crate::models::hash_params::HashParams;

/// 현재 URL 위치 (경로 + 해시 파라미터)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub pathname: String,
    pub hash: HashParams,
}

impl Location {
    pub fn new(pathname: &str, hash: HashParams) -> Self {
        Self {
            pathname: pathname.to_string(),
            hash,
        }
    }

    /// 절대 URL 또는 `/path#fragment` 형태의 상대 경로 해석
    ///
    /// 쿼리 문자열은 버린다.
    pub fn from_href(href: &str) -> Self {
        if let Ok(url) = url::Url::parse(href) {
            return Self::new(url.path(), HashParams::parse(url.fragment().unwrap_or("")));
        }

        let (path, fragment) = href.split_once('#').unwrap_or((href, ""));
        let path = path.split('?').next().unwrap_or("");
        let path = if path.is_empty() { "/" } else { path };
        Self::new(path, HashParams::parse(fragment))
    }

    /// `/path#fragment` 형태로 출력
    pub fn to_href(&self) -> String {
        let fragment = self.hash.to_fragment();
        if fragment.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}#{}", self.pathname, fragment)
        }
    }
}

/// 히스토리 기록 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// 새 항목 추가 (뒤로 가기로 되돌릴 수 있음)
    Push,
    /// 현재 항목 교체
    Replace,
}

/// 녹화 테이블이 배치된 화면
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableLocation {
    #[default]
    RecordingsPage,
    HomePage,
    PersonPage,
}

impl TableLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableLocation::RecordingsPage => "recordings_page",
            TableLocation::HomePage => "home_page",
            TableLocation::PersonPage => "person_page",
        }
    }

    /// 이 화면이 반응하는 URL 패턴
    pub fn url_pattern(&self) -> &'static str {
        match self {
            TableLocation::RecordingsPage => "/recordings",
            TableLocation::HomePage => "/home",
            TableLocation::PersonPage => "/person/*",
        }
    }

    /// 경로가 패턴과 일치하는지 (끝의 `*` 한 개만 와일드카드로 지원)
    pub fn matches(&self, pathname: &str) -> bool {
        let pathname = pathname.trim_end_matches('/');
        match self.url_pattern().strip_suffix('*') {
            Some(prefix) => pathname.len() > prefix.len() && pathname.starts_with(prefix),
            None => pathname == self.url_pattern(),
        }
    }
}
