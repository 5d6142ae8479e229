//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 응답 본문은 `{"message": "..."}` 한 가지 모양만 사용합니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use catalog_core::CatalogError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "message": "product not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 도메인 에러를 HTTP 상태 코드 + 응답 본문으로 변환.
///
/// 저장소 내부 에러는 상세를 노출하지 않고 500 + 일반 메시지로
/// 내려가며, 상세는 로그로만 남깁니다.
pub fn error_response(err: CatalogError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, message) = match &err {
        CatalogError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
        CatalogError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
        }
        CatalogError::ExpiredToken => (StatusCode::UNAUTHORIZED, "token expired".to_string()),
        CatalogError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token".to_string()),
        CatalogError::PermissionDenied => {
            (StatusCode::FORBIDDEN, "insufficient permissions".to_string())
        }
        _ => {
            tracing::error!(error = %err, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    };

    (status, Json(ApiErrorResponse::new(message)))
}
