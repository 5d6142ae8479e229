//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 상품 저장소는 `ProductStore` 트레이트 뒤에 두어 테스트에서
//! 메모리 구현으로 대체할 수 있습니다.

pub mod products;
pub mod users;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use products::{NewProduct, PgProductRepository, ProductRecord, ProductStore, UpdateProduct};
pub use users::{Identity, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryProductStore;
