//! 인증/인가 서브시스템.
//!
//! - `jwt`: Access/Refresh 토큰 쌍 발급 및 무상태 검증
//! - `middleware`: bearer 토큰 추출기와 역할 검사
//! - `password`: Argon2 비밀번호 해싱/검증
//! - `roles`: 역할 정의 (계층 없음)

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod roles;

pub use jwt::{
    create_token, issue_pair, verify_token, Claims, JwtError, TokenPair, TokenType,
    ACCESS_TOKEN_TTL_DAYS, REFRESH_TOKEN_TTL_DAYS,
};
pub use middleware::{require_role, AdminUser, AuthError, AuthUser, JwtConfig};
pub use password::{hash_password, verify_password, PasswordError};
pub use roles::Role;
