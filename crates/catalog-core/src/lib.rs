//! # Catalog Core
//!
//! 카탈로그 서비스의 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 서비스 전반에서 사용되는 기반 타입을 제공합니다:
//! - 에러 분류 체계 (인증/저장소 실패 포함)
//! - 설정 관리 (파일 + 환경 변수)
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;
