//! 상품 카탈로그 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증 및 역할 기반 접근 제어
//! - 트랜잭션 기반 상품 저장소
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 데이터베이스 접근 계층
//! - [`error`]: 통합 API 에러 응답

pub mod auth;
pub mod error;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    hash_password, verify_password, AdminUser, AuthError, AuthUser, Claims, JwtConfig, JwtError,
    Role, TokenPair, TokenType,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use repository::{NewProduct, ProductRecord, ProductStore, UpdateProduct};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
