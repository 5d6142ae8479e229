//! Product Repository
//!
//! 상품 관련 데이터베이스 연산을 담당합니다. 모든 연산은 하나의
//! 트랜잭션 안에서 실행되며, 실패 시 부분 변경 없이 롤백됩니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use catalog_core::CatalogError;

// ================================================================================================
// Types
// ================================================================================================

/// 상품 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[sqlx(default)]
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 상품 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub picture_url: Option<String>,
}

/// 상품 업데이트 입력. 생략된 필드는 기존 값을 유지합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
}

// ================================================================================================
// Store contract
// ================================================================================================

/// 상품 저장소 계약.
///
/// 각 연산은 원자적입니다. 성공하면 변경 전체가 반영되고
/// 실패하면 아무것도 반영되지 않습니다. 존재하지 않는 id에 대한
/// 변경/삭제는 `CatalogError::NotFound`로 실패합니다.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 전체 상품 조회
    async fn find_all(&self) -> Result<Vec<ProductRecord>, CatalogError>;

    /// id로 단건 조회. 없으면 `Ok(None)`.
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRecord>, CatalogError>;

    /// 상품 생성. 저장된 레코드(id 포함)를 반환합니다.
    async fn create(&self, input: NewProduct) -> Result<ProductRecord, CatalogError>;

    /// 부분 업데이트. 생략된 필드는 유지되며 없는 id는 `NotFound`.
    async fn update(&self, id: i32, input: UpdateProduct) -> Result<ProductRecord, CatalogError>;

    /// 상품 삭제. 없는 id는 `NotFound`.
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}

// ================================================================================================
// PostgreSQL implementation
// ================================================================================================

/// PostgreSQL 기반 상품 저장소
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn persistence(e: sqlx::Error) -> CatalogError {
    CatalogError::Persistence(e.to_string())
}

#[async_trait]
impl ProductStore for PgProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let records =
            sqlx::query_as::<_, ProductRecord>("SELECT * FROM products ORDER BY id")
                .fetch_all(&mut *tx)
                .await
                .map_err(persistence)?;

        tx.commit().await.map_err(persistence)?;

        Ok(records)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRecord>, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let record = sqlx::query_as::<_, ProductRecord>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(persistence)?;

        tx.commit().await.map_err(persistence)?;

        Ok(record)
    }

    async fn create(&self, input: NewProduct) -> Result<ProductRecord, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            INSERT INTO products (name, description, price, category, picture_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(&input.picture_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(persistence)?;

        tx.commit().await.map_err(persistence)?;

        Ok(record)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> Result<ProductRecord, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                picture_url = COALESCE($6, picture_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(&input.picture_url)
        .fetch_optional(&mut *tx)
        .await
        .map_err(persistence)?;

        match record {
            Some(record) => {
                tx.commit().await.map_err(persistence)?;
                Ok(record)
            }
            None => {
                tx.rollback().await.map_err(persistence)?;
                Err(CatalogError::NotFound(format!("product {}", id)))
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(persistence)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(persistence)?;
            return Err(CatalogError::NotFound(format!("product {}", id)));
        }

        tx.commit().await.map_err(persistence)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_update_product_default_is_noop_patch() {
        let patch = UpdateProduct::default();
        assert!(patch.name.is_none());
        assert!(patch.price.is_none());
        assert!(patch.picture_url.is_none());
    }

    #[test]
    fn test_product_json_shape() {
        let input: NewProduct = serde_json::from_str(
            r#"{
                "name": "Keyboard",
                "description": "Mechanical keyboard",
                "price": "89.99",
                "category": "peripherals",
                "pictureUrl": "https://example.com/kb.png"
            }"#,
        )
        .unwrap();

        assert_eq!(input.name, "Keyboard");
        assert_eq!(input.price, dec!(89.99));
        assert_eq!(input.picture_url.as_deref(), Some("https://example.com/kb.png"));
    }

    #[test]
    fn test_new_product_picture_url_optional() {
        let input: NewProduct = serde_json::from_str(
            r#"{"name": "Mouse", "description": "Wireless", "price": "19.90", "category": "peripherals"}"#,
        )
        .unwrap();

        assert!(input.picture_url.is_none());
    }
}
