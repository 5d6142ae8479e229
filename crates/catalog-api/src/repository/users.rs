//! User Repository
//!
//! 로그인 시 사용자 신원 조회를 담당합니다. 사용자는 여러 역할
//! 매핑을 가질 수 있지만, 토큰에 실리는 역할은 매핑 테이블에서
//! 가장 먼저 생성된 행 하나로 고정됩니다.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use catalog_core::CatalogError;

// ================================================================================================
// Types
// ================================================================================================

/// 인증에 필요한 사용자 신원 스냅샷
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Identity {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// 역할 매핑 중 첫 행의 역할 이름
    pub role: String,
}

// ================================================================================================
// Repository
// ================================================================================================

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// 이메일로 사용자 + 대표 역할 조회.
    ///
    /// 역할 매핑이 없는 사용자는 INNER JOIN에서 걸러져 조회 실패로
    /// 처리됩니다. 여러 매핑이 있으면 `user_roles.id`가 가장 작은
    /// 행의 역할이 선택됩니다.
    pub async fn find_by_email_with_role(
        pool: &PgPool,
        email: &str,
    ) -> Result<Identity, CatalogError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;

        let identity = sqlx::query_as::<_, Identity>(
            r#"
            SELECT u.id, u.name, u.email, u.password AS password_hash, r.name AS role
            FROM users u
            INNER JOIN user_roles ur ON ur.user_id = u.id
            INNER JOIN roles r ON r.id = ur.role_id
            WHERE u.email = $1
            ORDER BY ur.id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| CatalogError::Persistence(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;

        identity.ok_or_else(|| CatalogError::NotFound(format!("user {}", email)))
    }
}
