//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate가 이 trait들을 구현하며,
//! `replay-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 네트워크를 타는 포트만 `async_trait`를 사용한다.
//! 라우터/분석/플래그는 동기 호출로 충분하다.

pub mod feature_flags;
pub mod recordings_api;
pub mod router;
pub mod usage;
