//! In-memory Product Store
//!
//! 데이터베이스 없이 `ProductStore` 계약을 만족하는 저장소.
//! 라우터 테스트와 계약 검증용으로만 컴파일됩니다.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use catalog_core::CatalogError;

use super::products::{NewProduct, ProductRecord, ProductStore, UpdateProduct};

/// 메모리 기반 상품 저장소.
///
/// 쓰기 연산은 단일 `RwLock` 쓰기 구간 안에서 수행되어
/// 원자성이 보장됩니다.
#[derive(Debug)]
pub struct MemoryProductStore {
    records: RwLock<BTreeMap<i32, ProductRecord>>,
    next_id: AtomicI32,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRecord>, CatalogError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn create(&self, input: NewProduct) -> Result<ProductRecord, CatalogError> {
        let mut records = self.records.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();

        let record = ProductRecord {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            picture_url: input.picture_url,
            created_at: now,
            updated_at: now,
        };

        records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> Result<ProductRecord, CatalogError> {
        let mut records = self.records.write().await;

        let record = records
            .get_mut(&id)
            .ok_or_else(|| CatalogError::NotFound(format!("product {}", id)))?;

        if let Some(name) = input.name {
            record.name = name;
        }
        if let Some(description) = input.description {
            record.description = description;
        }
        if let Some(price) = input.price {
            record.price = price;
        }
        if let Some(category) = input.category {
            record.category = category;
        }
        if let Some(picture_url) = input.picture_url {
            record.picture_url = Some(picture_url);
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let mut records = self.records.write().await;

        records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CatalogError::NotFound(format!("product {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn sample_product() -> NewProduct {
        NewProduct {
            name: "Keyboard".to_string(),
            description: "Mechanical keyboard".to_string(),
            price: dec!(89.99),
            category: "peripherals".to_string(),
            picture_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_find_returns_equal_record() {
        let store = MemoryProductStore::new();

        let created = store.create(sample_product()).await.unwrap();
        let found = store.find_by_id(created.id).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_missing_id_returns_none() {
        let store = MemoryProductStore::new();
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let store = MemoryProductStore::new();
        let created = store.create(sample_product()).await.unwrap();

        let updated = store
            .update(
                created.id,
                UpdateProduct {
                    price: Some(dec!(79.99)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, dec!(79.99));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.category, created.category);
    }

    #[tokio::test]
    async fn test_update_missing_id_fails_and_leaves_store_unchanged() {
        let store = MemoryProductStore::new();
        let created = store.create(sample_product()).await.unwrap();

        let result = store
            .update(
                created.id + 100,
                UpdateProduct {
                    name: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_fails() {
        let store = MemoryProductStore::new();
        let result = store.delete(7).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_delete_exactly_one_succeeds() {
        let store = Arc::new(MemoryProductStore::new());
        let created = store.create(sample_product()).await.unwrap();

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.delete(created.id).await })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.delete(created.id).await })
        };

        let (ra, rb) = (a.await.unwrap(), b.await.unwrap());

        // 정확히 한 쪽만 성공한다
        assert_eq!(ra.is_ok() as u8 + rb.is_ok() as u8, 1);
        assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
    }
}
