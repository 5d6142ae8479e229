//! 상품 라우트.
//!
//! 상품 CRUD 엔드포인트. 조회는 인증된 사용자 누구나 접근할 수
//! 있고, 생성/변경/삭제는 admin 역할이 필요합니다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::auth::{AdminUser, AuthUser};
use crate::error::{error_response, ApiErrorResponse, ApiResult};
use crate::repository::{NewProduct, ProductRecord, UpdateProduct};
use crate::state::AppState;

/// GET / - 전체 상품 조회
async fn list_products(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProductRecord>>> {
    let products = state.products.find_all().await.map_err(error_response)?;
    Ok(Json(products))
}

/// GET /{id} - 상품 단건 조회
async fn get_product(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ProductRecord>> {
    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse::new("product not found")),
            )
        })?;

    Ok(Json(product))
}

/// POST / - 상품 생성 (admin 전용)
async fn create_product(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewProduct>,
) -> ApiResult<impl IntoResponse> {
    let product = state.products.create(input).await.map_err(error_response)?;

    tracing::info!(product_id = product.id, name = %product.name, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /{id} - 상품 부분 업데이트 (admin 전용)
async fn update_product(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateProduct>,
) -> ApiResult<Json<ProductRecord>> {
    let product = state
        .products
        .update(id, input)
        .await
        .map_err(error_response)?;

    tracing::info!(product_id = id, "product updated");

    Ok(Json(product))
}

/// DELETE /{id} - 상품 삭제 (admin 전용)
async fn delete_product(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.products.delete(id).await.map_err(error_response)?;

    tracing::info!(product_id = id, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// 상품 라우터 생성.
pub fn products_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
