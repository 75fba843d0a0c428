//! 도메인 모델.
//!
//! 녹화 목록 API와 URL이 공유하는 데이터 구조체를 정의한다.

pub mod filters;
pub mod hash_params;
pub mod location;
pub mod recording;
