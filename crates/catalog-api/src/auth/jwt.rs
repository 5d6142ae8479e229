//! JWT 토큰 처리.
//!
//! Access/Refresh 토큰 쌍의 발급과 검증 로직.
//!
//! 토큰은 HS256으로 서명되며 서버는 발급된 토큰을 저장하지
//! 않습니다. 검증은 서명과 만료 시간만 확인하는 무상태
//! 연산이므로 철회(revocation)는 불가능합니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::Role;

/// Access 토큰 유효기간 (일).
pub const ACCESS_TOKEN_TTL_DAYS: i64 = 1;
/// Refresh 토큰 유효기간 (일).
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// 토큰 용도 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// 단일 요청 윈도우용 단기 토큰
    Access,
    /// 재발급용 장기 토큰
    Refresh,
}

/// JWT 페이로드.
///
/// 발급 시점에 확정되며 이후 불변입니다. 검증은 클레임을
/// 변경하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: i32,
    /// 사용자 이메일
    pub email: String,
    /// 사용자 역할
    pub role: Role,
    /// 토큰 용도 (access | refresh)
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued At - 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 주어진 발급 시점 기준으로 Claims 생성.
    ///
    /// 만료 시간은 용도에 따라 발급 시점 + 1일(access) 또는
    /// + 7일(refresh)로 고정됩니다.
    fn new_at(
        user_id: i32,
        email: impl Into<String>,
        role: Role,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let ttl_days = match token_type {
            TokenType::Access => ACCESS_TOKEN_TTL_DAYS,
            TokenType::Refresh => REFRESH_TOKEN_TTL_DAYS,
        };
        Self {
            sub: user_id,
            email: email.into(),
            role,
            token_type,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(ttl_days)).timestamp(),
        }
    }

    /// 새로운 Claims 생성 (현재 시각 기준).
    pub fn new(user_id: i32, email: impl Into<String>, role: Role, token_type: TokenType) -> Self {
        Self::new_at(user_id, email, role, token_type, Utc::now())
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Access Token + Refresh Token 쌍.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access Token
    pub access_token: String,
    /// Refresh Token
    pub refresh_token: String,
}

/// JWT 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("token expired")]
    TokenExpired,
    #[error("invalid token")]
    InvalidToken,
}

/// 토큰 생성.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// 검증된 신원으로부터 Access + Refresh 토큰 쌍 발급.
///
/// 두 토큰 모두 같은 신원 스냅샷과 같은 발급 시점에서
/// 생성됩니다.
pub fn issue_pair(
    user_id: i32,
    email: &str,
    role: Role,
    secret: &str,
) -> Result<TokenPair, JwtError> {
    let issued_at = Utc::now();
    let access_claims = Claims::new_at(user_id, email, role, TokenType::Access, issued_at);
    let refresh_claims = Claims::new_at(user_id, email, role, TokenType::Refresh, issued_at);

    Ok(TokenPair {
        access_token: create_token(&access_claims, secret)?,
        refresh_token: create_token(&refresh_claims, secret)?,
    })
}

/// JWT 토큰 디코딩 및 검증.
///
/// 만료된 토큰은 `TokenExpired`, 서명/구조가 잘못된 토큰은
/// `InvalidToken`으로 실패합니다.
///
/// 이 단계에서 `type` 클레임은 검사하지 않으므로 refresh
/// 토큰도 서명과 만료만 유효하면 통과합니다. 호출자가 용도를
/// 구분해야 하면 반환된 클레임의 `token_type`을 직접 확인해야
/// 합니다.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    // 만료 판정에 시계 허용 오차를 두지 않는다. `exp`가 지난 토큰은
    // 즉시 실패해야 하며 `Claims::is_expired`와 같은 기준을 쓴다.
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    #[test]
    fn test_issue_pair_and_verify_access() {
        let pair = issue_pair(1, "lucas@gmail.com", Role::Admin, TEST_SECRET).unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());

        let claims = verify_token(&pair.access_token, TEST_SECRET).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.email, "lucas@gmail.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_pair_expiry_windows() {
        let pair = issue_pair(2, "john@gmail.com", Role::User, TEST_SECRET).unwrap();
        let access = verify_token(&pair.access_token, TEST_SECRET).unwrap();
        let refresh = verify_token(&pair.refresh_token, TEST_SECRET).unwrap();

        // 같은 스냅샷, 같은 발급 시점
        assert_eq!(access.iat, refresh.iat);
        assert_eq!(access.sub, refresh.sub);

        assert_eq!(access.exp - access.iat, ACCESS_TOKEN_TTL_DAYS * 24 * 3600);
        assert_eq!(refresh.exp - refresh.iat, REFRESH_TOKEN_TTL_DAYS * 24 * 3600);
    }

    #[test]
    fn test_expired_token_fails_as_expired() {
        // 발급 시점을 과거로 밀어 이미 만료된 토큰 생성
        let issued_at = Utc::now() - Duration::days(2);
        let claims = Claims::new_at(1, "lucas@gmail.com", Role::Admin, TokenType::Access, issued_at);
        let token = create_token(&claims, TEST_SECRET).unwrap();

        let result = verify_token(&token, TEST_SECRET);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_just_expired_token_fails_without_grace_window() {
        // 만료 직후의 토큰도 유예 없이 즉시 거부되어야 한다
        let mut claims = Claims::new(1, "lucas@gmail.com", Role::Admin, TokenType::Access);
        claims.exp = (Utc::now() - Duration::seconds(30)).timestamp();
        let token = create_token(&claims, TEST_SECRET).unwrap();

        assert!(claims.is_expired());
        let result = verify_token(&token, TEST_SECRET);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_fails_as_invalid() {
        let pair = issue_pair(1, "lucas@gmail.com", Role::Admin, TEST_SECRET).unwrap();
        let result = verify_token(
            &pair.access_token,
            "another-secret-key-for-testing-minimum-32-chars",
        );
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_fails_as_invalid() {
        let result = verify_token("not.a.token", TEST_SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_refresh_token_passes_verification() {
        // 검증 단계는 토큰 용도를 구분하지 않는다
        let pair = issue_pair(1, "lucas@gmail.com", Role::Admin, TEST_SECRET).unwrap();
        let claims = verify_token(&pair.refresh_token, TEST_SECRET).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
    }
}
