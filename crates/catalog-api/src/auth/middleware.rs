//! 인증 미들웨어.
//!
//! 요청의 `Authorization` 헤더에서 bearer 토큰을 추출해 검증하고,
//! 디코딩된 클레임을 타입이 있는 추출기 값으로 핸들러에
//! 전달합니다. 요청 객체를 변형하지 않으며 클레임의 수명은 단일
//! 요청입니다.
//!
//! 상태 기계:
//! - 토큰 없음 → 401 (`Token not found`)
//! - 토큰 있음 → 검증 → 유효하면 클레임 첨부 후 계속,
//!   만료/변조면 401
//! - 역할 단계: 클레임 없음은 빈 역할 집합으로 취급 → 403,
//!   허용 집합에 없는 역할 → 403 (`insufficient permissions`)

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{verify_token, Claims, JwtError, Role};
use crate::error::ApiErrorResponse;

/// JWT 시크릿 보관용 설정.
///
/// 프로세스 시작 시 한 번 주입되고 이후 읽기 전용입니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

/// 인증/권한 에러.
///
/// `Display` 문자열이 그대로 응답 본문의 `message`가 됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token not found")]
    MissingToken,
    #[error("invalid authorization header")]
    InvalidAuthHeader,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid token")]
    InvalidToken,
    #[error("insufficient permissions")]
    InsufficientPermission,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InsufficientPermission => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };

        (status, Json(ApiErrorResponse::new(self.to_string()))).into_response()
    }
}

/// 인증된 사용자 추출기.
///
/// 검증에 성공한 요청의 디코딩된 클레임을 담습니다.
///
/// ```rust,ignore
/// async fn handler(AuthUser(claims): AuthUser) -> impl IntoResponse {
///     format!("hello, {}", claims.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtConfig: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let config = JwtConfig::from_ref(state);

        let claims = verify_token(token, &config.secret).map_err(|e| match e {
            JwtError::TokenExpired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(AuthUser(claims))
    }
}

/// 역할 집합 포함 검사.
///
/// 클레임이 없으면 빈 역할 집합으로 취급해 거부합니다. 역할 간
/// 계층은 없습니다.
pub fn require_role(allowed: &[Role], claims: Option<&Claims>) -> Result<(), AuthError> {
    match claims {
        Some(claims) if allowed.contains(&claims.role) => Ok(()),
        _ => Err(AuthError::InsufficientPermission),
    }
}

/// Admin 역할을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtConfig: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        require_role(&[Role::Admin], Some(&claims))?;
        Ok(AdminUser(claims))
    }
}
