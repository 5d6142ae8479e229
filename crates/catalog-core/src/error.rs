//! 카탈로그 서비스의 에러 타입.
//!
//! 인증, 권한 부여, 저장소 접근에서 발생하는 실패를 하나의
//! 분류 체계로 정의합니다. 각 계층은 타입이 있는 에러를 위로
//! 전파하며 자동 재시도는 없습니다. 모든 실패는 해당 요청에
//! 대해 종결적입니다.

use thiserror::Error;

/// 핵심 서비스 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 대상 없음 (사용자 또는 상품)
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 비밀번호 불일치
    #[error("잘못된 자격증명")]
    InvalidCredentials,

    /// 토큰 유효기간 만료
    #[error("토큰이 만료되었습니다")]
    ExpiredToken,

    /// 서명 또는 구조가 잘못된 토큰
    #[error("유효하지 않은 토큰")]
    InvalidToken,

    /// 역할 검사 실패
    #[error("권한이 부족합니다")]
    PermissionDenied,

    /// 트랜잭션 수준 저장소 실패 (롤백 완료 후 표면화)
    #[error("저장소 에러: {0}")]
    Persistence(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 카탈로그 작업을 위한 Result 타입.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// 클라이언트 잘못(4xx)으로 분류되는 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_)
                | CatalogError::InvalidCredentials
                | CatalogError::ExpiredToken
                | CatalogError::InvalidToken
                | CatalogError::PermissionDenied
        )
    }

    /// 인증/권한 관련 에러인지 확인합니다.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidCredentials
                | CatalogError::ExpiredToken
                | CatalogError::InvalidToken
                | CatalogError::PermissionDenied
        )
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(CatalogError::NotFound("product 1".to_string()).is_client_error());
        assert!(CatalogError::InvalidCredentials.is_client_error());
        assert!(CatalogError::PermissionDenied.is_client_error());

        assert!(!CatalogError::Persistence("connection reset".to_string()).is_client_error());
        assert!(!CatalogError::Internal("oops".to_string()).is_client_error());
    }

    #[test]
    fn test_auth_error_classification() {
        assert!(CatalogError::ExpiredToken.is_auth_error());
        assert!(CatalogError::InvalidToken.is_auth_error());

        assert!(!CatalogError::NotFound("user".to_string()).is_auth_error());
        assert!(!CatalogError::Persistence("x".to_string()).is_auth_error());
    }
}
