//! 인증 라우트.
//!
//! 이메일/비밀번호 로그인으로 JWT 토큰 쌍을 발급합니다.
//! 로그인 실패 시 사용자 미존재와 비밀번호 불일치를 구분하지
//! 않고 동일한 401 응답을 반환합니다.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use catalog_core::CatalogError;

use crate::auth::{issue_pair, verify_password, Role, TokenPair};
use crate::error::{error_response, ApiErrorResponse, ApiResult};
use crate::repository::{Identity, UserRepository};
use crate::state::AppState;

/// 로그인 요청.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 조회된 신원에 대해 비밀번호를 검증하고 토큰 쌍을 발급.
///
/// - 비밀번호 불일치 → `InvalidCredentials`
/// - 저장된 해시 손상 → `Persistence`
/// - 알 수 없는 역할 문자열 → `Persistence` (데이터 무결성 문제)
fn issue_for_identity(
    identity: &Identity,
    password: &str,
    secret: &str,
) -> Result<TokenPair, CatalogError> {
    let matches = verify_password(password, &identity.password_hash)
        .map_err(|e| CatalogError::Persistence(e.to_string()))?;

    if !matches {
        return Err(CatalogError::InvalidCredentials);
    }

    let role = Role::parse(&identity.role).ok_or_else(|| {
        CatalogError::Persistence(format!("unknown role '{}' for user {}", identity.role, identity.id))
    })?;

    issue_pair(identity.id, &identity.email, role, secret)
        .map_err(|e| CatalogError::Internal(e.to_string()))
}

/// POST /api/v1/auth/login
///
/// 성공 시 access/refresh 토큰 쌍을 반환합니다.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenPair>> {
    let identity = UserRepository::find_by_email_with_role(&state.db_pool, &request.email)
        .await
        .and_then(|identity| issue_for_identity(&identity, &request.password, &state.jwt.secret));

    match identity {
        Ok(pair) => Ok(Json(pair)),
        // 미존재/불일치는 동일한 응답으로 수렴시키고 상세는 로그로만 남긴다
        Err(CatalogError::NotFound(_)) | Err(CatalogError::InvalidCredentials) => {
            tracing::debug!(email = %request.email, "login rejected");
            Err((
                axum::http::StatusCode::UNAUTHORIZED,
                Json(ApiErrorResponse::new("invalid credentials")),
            ))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}
